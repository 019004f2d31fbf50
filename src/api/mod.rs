pub mod admin;
mod errors;

use crate::enums::common::HealthResp;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Resource, Responder};
pub use errors::callable_error;
pub(crate) use errors::default_error_handler;
use utoipa::openapi::OpenApi;
use utoipa_actix_web::service_config::ServiceConfig;

#[utoipa::path(
    tag = "Service",
    responses((status = 200, description = "Server is running", body = String)),
    summary = "Server banner"
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

#[utoipa::path(
    tag = "Service",
    responses((status = 200, description = "Server is healthy", body = HealthResp)),
    summary = "Health check"
)]
#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResp {
        status: "ok".to_string(),
    })
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint)
        .service(health)
        .configure(|cfg| admin::config(cfg, state));
}

/// Serves the generated OpenAPI document at `/openapi.json`.
pub fn openapi_service(api: OpenApi) -> Resource {
    web::resource("/openapi.json").route(web::get().to(move || {
        let api = api.clone();
        async move { HttpResponse::Ok().json(api) }
    }))
}
