use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employer-authored listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub description: String,
    pub posted_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields an employer supplies when posting a job
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub description: String,
}

/// Search over the catalog.
///
/// `query` matches title, description, company or location (any of them);
/// `title`, `company` and `location` each narrow the result further.
/// All comparisons are case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobFilter {
    pub query: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl JobFilter {
    /// Drops blank terms and trims the rest, so `?query=` behaves like no query.
    pub fn normalized(self) -> Self {
        fn clean(term: Option<String>) -> Option<String> {
            term.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
        }

        Self {
            query: clean(self.query),
            title: clean(self.title),
            company: clean(self.company),
            location: clean(self.location),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.title.is_none() && self.company.is_none() && self.location.is_none()
    }

    pub fn matches(&self, job: &JobPosting) -> bool {
        let query_hit = self.query.as_deref().map_or(true, |q| {
            contains_ci(&job.title, q)
                || contains_ci(&job.description, q)
                || contains_ci(&job.company_name, q)
                || contains_ci(&job.location, q)
        });

        query_hit
            && self.title.as_deref().map_or(true, |t| contains_ci(&job.title, t))
            && self.company.as_deref().map_or(true, |c| contains_ci(&job.company_name, c))
            && self.location.as_deref().map_or(true, |l| contains_ci(&job.location, l))
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, location: &str, description: &str) -> JobPosting {
        JobPosting {
            id: 1,
            title: title.to_string(),
            company_name: company.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            posted_by: 1,
            created_at: Utc::now(),
        }
    }

    fn filter(query: Option<&str>, title: Option<&str>, company: Option<&str>, location: Option<&str>) -> JobFilter {
        JobFilter {
            query: query.map(str::to_string),
            title: title.map(str::to_string),
            company: company.map(str::to_string),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn query_matches_any_of_four_fields() {
        let f = filter(Some("ACME"), None, None, None);
        assert!(f.matches(&job("Acme engineer", "Other", "Berlin", "x")));
        assert!(f.matches(&job("Engineer", "acme corp", "Berlin", "x")));
        assert!(f.matches(&job("Engineer", "Other", "Acmeville", "x")));
        assert!(f.matches(&job("Engineer", "Other", "Berlin", "we love acme")));
        assert!(!f.matches(&job("Engineer", "Other", "Berlin", "nothing")));
    }

    #[test]
    fn field_filters_are_anded_on_top_of_query() {
        let f = filter(Some("rust"), None, None, Some("berlin"));
        assert!(f.matches(&job("Rust dev", "Acme", "Berlin", "x")));
        assert!(!f.matches(&job("Rust dev", "Acme", "Paris", "x")));

        let f = filter(None, Some("dev"), Some("acme"), None);
        assert!(f.matches(&job("Backend Dev", "ACME", "Paris", "x")));
        assert!(!f.matches(&job("Backend Dev", "Initech", "Paris", "x")));
    }

    #[test]
    fn blank_terms_are_dropped() {
        let f = filter(Some("   "), Some(""), None, Some(" paris ")).normalized();
        assert_eq!(f.query, None);
        assert_eq!(f.title, None);
        assert_eq!(f.location.as_deref(), Some("paris"));
        assert!(!f.is_empty());
        assert!(JobFilter::default().normalized().is_empty());
    }
}
