//! Session helpers so handlers receive the acting account as a plain value.

use actix_session::{config::CookieContentSecurity, storage::CookieSessionStore, Session, SessionExt, SessionMiddleware};
use actix_web::{cookie::Key, dev::Payload, web::Data, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::ops::Deref;

use crate::api::account::AccountService;
use crate::api::error::ServiceError;
use crate::domain::Account;

const ACCOUNT_ID_KEY: &str = "account_id";

/// Encrypted cookie sessions; the cookie carries only the account id
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("job_board_session".to_string())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(cookie_secure)
        .build()
}

/// Newtype over the actix session exposing account-level operations
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `account`
    pub fn log_in(&self, account: &Account) -> Result<(), ServiceError> {
        self.0.renew();
        self.0
            .insert(ACCOUNT_ID_KEY, account.id)
            .map_err(|e| ServiceError::InternalError(format!("failed to persist session: {e}")))
    }

    pub fn account_id(&self) -> Result<Option<i64>, ServiceError> {
        self.0
            .get::<i64>(ACCOUNT_ID_KEY)
            .map_err(|e| ServiceError::InternalError(format!("failed to read session: {e}")))
    }

    pub fn log_out(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// The authenticated account behind the request's session.
///
/// Extraction fails with `401` when there is no session or its account is gone.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl Deref for CurrentAccount {
    type Target = Account;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentAccount {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = SessionContext::new(req.get_session());
        let accounts = req.app_data::<Data<AccountService>>().cloned();

        Box::pin(async move {
            let accounts = accounts
                .ok_or_else(|| ServiceError::InternalError("account service not configured".to_string()))?;
            let account_id = session.account_id()?.ok_or(ServiceError::Unauthenticated)?;

            match accounts.find(account_id).await? {
                Some(account) => Ok(CurrentAccount(account)),
                None => {
                    tracing::warn!("Session refers to missing account {}", account_id);
                    session.log_out();
                    Err(ServiceError::Unauthenticated.into())
                }
            }
        })
    }
}
