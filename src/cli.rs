use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "job-board", version, about = "Job board HTTP service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Keep everything in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::parse_from(["job-board", "serve", "--in-memory"]);
        assert!(matches!(cli.command, Some(Command::Serve { in_memory: true })));

        let cli = Cli::parse_from(["job-board", "migrate"]);
        assert!(matches!(cli.command, Some(Command::Migrate)));

        let cli = Cli::parse_from(["job-board"]);
        assert!(cli.command.is_none());
    }
}
