//! Test conventions:
//! - Collaborators are the in-memory fakes from `admin_users::test_utils`.
//! - Bearer tokens are resolved by `StaticTokenVerifier` (see `ADMIN_TOKEN`, `MEMBER_TOKEN`).
//! - Google endpoints are served by wiremock.

#![allow(dead_code)]

pub mod keys;

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use admin_users::api;
use admin_users::db::{AuthorizationStore, UserDirectory};
use admin_users::test_utils::build_test_state;
use serde_json::Value;
use utoipa_actix_web::AppExt;

pub fn auth_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Sends `req` through the full app wired with the given collaborators.
pub async fn send(
    admins: Arc<dyn AuthorizationStore>,
    directory: Arc<dyn UserDirectory>,
    req: test::TestRequest,
) -> (StatusCode, web::Bytes) {
    let state = build_test_state(admins, directory);
    let app = test::init_service(
        App::new()
            .into_utoipa_app()
            .configure(|cfg| api::configure(cfg, &state))
            .openapi_service(api::openapi_service)
            .into_app(),
    )
    .await;
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, body)
}

pub async fn call_list_users(
    admins: Arc<dyn AuthorizationStore>,
    directory: Arc<dyn UserDirectory>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = test::TestRequest::post()
        .uri("/listUsers")
        .set_json(serde_json::json!({ "data": null }));
    if let Some(token) = token {
        req = req.insert_header(auth_header(token));
    }
    let (status, body) = send(admins, directory, req).await;
    let json: Value = serde_json::from_slice(&body).expect("json body");
    (status, json)
}

pub fn assert_callable_error(body: &Value, status: &str, message: &str) {
    assert_eq!(body["error"]["status"], status, "unexpected body: {body}");
    assert_eq!(body["error"]["message"], message, "unexpected body: {body}");
    assert!(body.get("result").is_none(), "error replies carry no result: {body}");
}
