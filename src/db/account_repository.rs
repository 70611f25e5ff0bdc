use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::{AccountRow, CredentialRow};
use crate::db::store::StoreError;
use crate::domain::{Account, NewAccount};

const ACCOUNT_COLUMNS: &str = "id, username, email, role, created_at";

/// Repository for account database operations
pub struct AccountRepository;

impl AccountRepository {
    /// Insert a new account; duplicate username or email maps to `StoreError::Conflict`
    pub async fn create(pool: &Pool<Postgres>, account: &NewAccount) -> Result<Account, StoreError> {
        debug!("Creating account: username={}, role={}", account.username, account.role);

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "INSERT INTO accounts (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .fetch_one(pool)
        .await
        .map_err(map_identity_conflict)?;

        debug!("Account created with id={}", row.id);
        row.try_into()
    }

    pub async fn find(pool: &Pool<Postgres>, id: i64) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    /// Username matches exactly, email case-insensitively
    pub async fn find_credentials(
        pool: &Pool<Postgres>,
        identifier: &str,
    ) -> Result<Option<(Account, String)>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash FROM accounts \
             WHERE username = $1 OR LOWER(email) = LOWER($1) \
             ORDER BY (username = $1) DESC \
             LIMIT 1"
        ))
        .bind(identifier)
        .fetch_optional(pool)
        .await?;

        match row {
            Some(row) => Ok(Some((row.account.try_into()?, row.password_hash))),
            None => Ok(None),
        }
    }
}

fn map_identity_conflict(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("accounts_email_key") => StoreError::Conflict("email"),
                _ => StoreError::Conflict("username"),
            };
        }
    }
    StoreError::Database(err)
}
