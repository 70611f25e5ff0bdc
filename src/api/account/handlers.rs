use actix_web::{
    delete, post,
    web::{scope, Data, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::Json;

use super::dto::{AccountResponse, MessageResponse};
use super::models::{LoginRequest, RegisterRequest};
use super::service::AccountService;
use crate::api::error::ServiceError;
use crate::api::session::{CurrentAccount, SessionContext};

#[post("")]
async fn register(
    service: Data<AccountService>,
    request: Json<RegisterRequest>,
) -> Result<HttpResponse, ServiceError> {
    let account = service.register(&request).await?;
    Ok(HttpResponse::Created().json(AccountResponse {
        message: format!("{} account created successfully! Please log in.", capitalize(account.role.as_str())),
        account,
    }))
}

#[post("")]
async fn login(
    service: Data<AccountService>,
    session: SessionContext,
    request: Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    let account = service.authenticate(&request.identifier, &request.password).await?;
    session.log_in(&account)?;

    Ok(HttpResponse::Ok().json(AccountResponse {
        message: "Logged in successfully".to_string(),
        account,
    }))
}

#[delete("")]
async fn logout(_account: CurrentAccount, session: SessionContext) -> HttpResponse {
    session.log_out();
    HttpResponse::Ok().json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn account_config(config: &mut ServiceConfig) {
    config
        .service(scope("accounts").service(register))
        .service(scope("sessions").service(login).service(logout));
}
