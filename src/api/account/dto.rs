use serde::Serialize;

use crate::domain::Account;

/// Response for registration and login
#[derive(Serialize)]
pub struct AccountResponse {
    pub message: String,
    pub account: Account,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
