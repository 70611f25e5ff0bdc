//! Shared fixtures: an app over the in-memory store plus request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use serde_json::{json, Value};

use job_board::api::session::session_middleware;
use job_board::db::InMemoryStore;
use job_board::storage::InMemoryFileStorage;
use job_board::Services;

pub const PASSWORD: &str = "correct-horse-battery";
const BOUNDARY: &str = "jobboardtestboundary7MA4YWxk";

pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub files: Arc<InMemoryFileStorage>,
    pub services: Services,
}

pub fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let files = Arc::new(InMemoryFileStorage::new());
    let services = Services::new(store.clone(), files.clone()).with_upload_limit(1024 * 1024);
    Fixture { store, files, services }
}

pub fn test_app(
    services: Services,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(session_middleware(Key::generate(), false))
        .configure(move |cfg| services.configure(cfg))
}

pub async fn body_json<B: MessageBody>(response: ServiceResponse<B>) -> Value {
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

pub async fn register<S, B>(app: &S, username: &str, role: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/accounts")
        .set_json(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": PASSWORD,
            "role": role,
        }))
        .to_request();
    test::call_service(app, request).await
}

pub async fn login<S, B>(app: &S, identifier: &str, password: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/sessions")
        .set_json(json!({"identifier": identifier, "password": password}))
        .to_request();
    test::call_service(app, request).await
}

pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|c| c.name() == "job_board_session")
        .expect("session cookie")
        .into_owned()
}

/// Register and log in, returning the session cookie
pub async fn signed_in<S, B>(app: &S, username: &str, role: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let registered = register(app, username, role).await;
    assert_eq!(registered.status(), StatusCode::CREATED);
    let logged_in = login(app, username, PASSWORD).await;
    assert_eq!(logged_in.status(), StatusCode::OK);
    session_cookie(&logged_in)
}

pub async fn post_job<S, B>(app: &S, cookie: &Cookie<'static>, title: &str, company: &str, location: &str, description: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/jobs")
        .cookie(cookie.clone())
        .set_json(json!({
            "title": title,
            "company_name": company,
            "location": location,
            "description": description,
        }))
        .to_request();
    test::call_service(app, request).await
}

/// Posts a job and returns its id
pub async fn posted_job_id<S, B>(app: &S, cookie: &Cookie<'static>, title: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = post_job(app, cookie, title, "Acme", "Remote", "Build the thing").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["job"]["id"].as_i64().expect("job id")
}

/// Hand-built multipart body; `None` leaves the part out
pub fn multipart(resume: Option<&[u8]>, cover_letter: Option<&str>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    if let Some(bytes) = resume {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(text) = cover_letter {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"cover_letter\"\r\n\r\n{text}\r\n").as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub async fn apply<S, B>(app: &S, cookie: &Cookie<'static>, job_id: i64, resume: Option<&[u8]>, cover_letter: Option<&str>) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (content_type, body) = multipart(resume, cover_letter);
    let request = test::TestRequest::post()
        .uri(&format!("/jobs/{job_id}/applications"))
        .cookie(cookie.clone())
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    test::call_service(app, request).await
}

pub async fn set_status<S, B>(app: &S, cookie: &Cookie<'static>, application_id: i64, status: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::patch()
        .uri(&format!("/applications/{application_id}"))
        .cookie(cookie.clone())
        .set_json(json!({"status": status}))
        .to_request();
    test::call_service(app, request).await
}

pub async fn get<S, B>(app: &S, cookie: Option<&Cookie<'static>>, uri: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    test::call_service(app, request.to_request()).await
}
