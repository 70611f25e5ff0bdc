use actix_web::{cookie::Key, web, App, HttpServer};
use clap::Parser;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use job_board::api::session::session_middleware;
use job_board::config::Config;
use job_board::db::{self, InMemoryStore, PgStore, Store};
use job_board::storage::{FileStorage, InMemoryFileStorage, LocalFileStorage};
use job_board::Services;

mod cli;
mod shutdown;

use crate::cli::{Cli, Command};
use crate::shutdown::ShutdownCoordinator;

fn other_error(msg: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, msg.to_string())
}

/// Console output plus daily rotating files per level:
/// logs/info.log.2024-12-22, logs/error.log.2024-12-22, ...
fn init_tracing(log_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "info.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "warn.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "error.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "debug.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .with(debug_layer)
        .try_init()
        .map_err(other_error)
}

async fn connect(config: &Config) -> io::Result<sqlx::Pool<sqlx::Postgres>> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| other_error("DATABASE_URL must be set in .env file or environment"))?;

    let pool = db::connection::get_connection(database_url, config.max_db_connections)
        .await
        .map_err(|e| other_error(format!("Failed to connect to database: {e}")))?;
    info!("Database connection pool established");
    Ok(pool)
}

fn session_key(config: &Config) -> io::Result<Key> {
    match &config.session_secret {
        Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| other_error(format!("Invalid SESSION_SECRET: {e}"))),
        None => {
            warn!("SESSION_SECRET not set; generated a random key, sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

async fn serve(config: Config, in_memory: bool) -> io::Result<()> {
    info!("Starting job-board application");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Media root: {}", config.media_root.display());

    let (store, files, pool): (Arc<dyn Store>, Arc<dyn FileStorage>, _) = if in_memory {
        warn!("Running with the in-memory store; data is lost on exit");
        (Arc::new(InMemoryStore::new()), Arc::new(InMemoryFileStorage::new()), None)
    } else {
        info!("  - Max database connections: {}", config.max_db_connections);
        let pool = connect(&config).await?;

        // Auto-migrate when starting the server
        db::migrations::run_migrations(&pool)
            .await
            .map_err(|e| other_error(format!("Failed to run database migrations: {e}")))?;

        (
            Arc::new(PgStore::new(pool.clone())),
            Arc::new(LocalFileStorage::new(config.media_root.clone())),
            Some(pool),
        )
    };

    let key = session_key(&config)?;
    let cookie_secure = config.cookie_secure;
    let max_payload_size = config.max_payload_size;
    let services = Services::new(store, files).with_upload_limit(max_payload_size);

    let server = HttpServer::new(move || {
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .wrap(session_middleware(key.clone(), cookie_secure))
            .app_data(payload_config)
            .configure(|cfg| services.configure(cfg))
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server.bind((config.host.as_str(), config.port))?.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().map_err(other_error)?;
    init_tracing(&config.log_dir)?;

    // No command provided - start the server
    match cli.command.unwrap_or(Command::Serve { in_memory: false }) {
        Command::Serve { in_memory } => serve(config, in_memory).await,
        Command::Migrate => {
            let pool = connect(&config).await?;
            db::migrations::run_migrations(&pool)
                .await
                .map_err(|e| other_error(format!("Failed to run database migrations: {e}")))?;
            pool.close().await;
            Ok(())
        }
    }
}
