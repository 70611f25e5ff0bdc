use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use validator::Validate;

use super::models::RegisterRequest;
use super::password::{hash_secret, verify_secret};
use crate::api::error::ServiceError;
use crate::db::{Store, StoreError};
use crate::domain::{Account, NewAccount, Role};

/// Account registration and credential checks
pub struct AccountService {
    store: Arc<dyn Store>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register an account with a fixed role
    ///
    /// # Returns
    /// - `Err(InvalidRole)` when the role is neither employer nor applicant
    /// - `Err(DuplicateIdentity)` when the username or email is taken
    pub async fn register(&self, request: &RegisterRequest) -> Result<Account, ServiceError> {
        request.validate().map_err(|e| ServiceError::validation(&e))?;
        let role: Role = request
            .role
            .parse()
            .map_err(|_| ServiceError::InvalidRole(request.role.clone()))?;

        info!("Service: Registering {} account username={}", role, request.username);

        let password = request.password.clone();
        let password_hash = web::block(move || hash_secret(&password))
            .await
            .map_err(|e| ServiceError::InternalError(format!("hashing task failed: {e}")))?
            .map_err(|e| ServiceError::InternalError(format!("hashing failed: {e}")))?;

        let account = self
            .store
            .insert_account(NewAccount {
                username: request.username.clone(),
                email: request.email.clone(),
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(field) => {
                    warn!("Service: Registration rejected, {} already taken", field);
                    ServiceError::DuplicateIdentity(field)
                }
                other => ServiceError::StoreError(other),
            })?;

        info!("Service: Account registered with id={}", account.id);
        Ok(account)
    }

    /// Check a username-or-email and secret pair
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Account, ServiceError> {
        let Some((account, stored_hash)) = self.store.find_credentials(identifier).await? else {
            warn!("Service: Login failed for unknown identifier");
            return Err(ServiceError::InvalidCredentials);
        };

        let secret = secret.to_string();
        let verified = web::block(move || verify_secret(&secret, &stored_hash))
            .await
            .map_err(|e| ServiceError::InternalError(format!("verification task failed: {e}")))?;

        if verified {
            info!("Service: Account {} logged in", account.id);
            Ok(account)
        } else {
            warn!("Service: Login failed for account {}", account.id);
            Err(ServiceError::InvalidCredentials)
        }
    }

    pub async fn find(&self, id: i64) -> Result<Option<Account>, ServiceError> {
        Ok(self.store.find_account(id).await?)
    }
}
