pub mod account;
pub mod application;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod job;
pub mod session;
pub mod validation;

use std::sync::Arc;

use actix_web::web::{Data, ServiceConfig};

use crate::db::Store;
use crate::storage::FileStorage;
use account::{handlers::account_config, AccountService};
use application::{handlers::application_config, ApplicationService};
use dashboard::dashboard_config;
use health::health_config;
use job::{handlers::job_config, JobService};

/// Services shared by every worker; cheap to clone
#[derive(Clone)]
pub struct Services {
    store: Data<dyn Store>,
    accounts: Data<AccountService>,
    jobs: Data<JobService>,
    applications: Data<ApplicationService>,
    upload_limit: usize,
}

impl Services {
    pub fn new(store: Arc<dyn Store>, files: Arc<dyn FileStorage>) -> Self {
        Self {
            accounts: Data::new(AccountService::new(store.clone())),
            jobs: Data::new(JobService::new(store.clone())),
            applications: Data::new(ApplicationService::new(store.clone(), files)),
            store: Data::from(store),
            upload_limit: 10 * 1024 * 1024,
        }
    }

    /// Largest accepted multipart upload, in bytes
    pub fn with_upload_limit(mut self, upload_limit: usize) -> Self {
        self.upload_limit = upload_limit;
        self
    }

    /// Register app data and every route
    pub fn configure(&self, config: &mut ServiceConfig) {
        config
            .app_data(self.store.clone())
            .app_data(self.accounts.clone())
            .app_data(self.jobs.clone())
            .app_data(self.applications.clone())
            .app_data(validation::json_config())
            .app_data(validation::multipart_config(self.upload_limit));

        config
            .configure(health_config)
            .configure(account_config)
            .configure(job_config)
            .configure(application_config)
            .configure(dashboard_config);
    }
}
