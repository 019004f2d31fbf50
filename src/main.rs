#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use admin_users::config::AppConfig;
use admin_users::{api, AppState};
use dotenvy::dotenv;
use utoipa_actix_web::AppExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;

    info!(
        "Initializing clients for project '{}'...",
        config.services.project_id
    );
    let state = AppState::new(&config).map_err(|e| {
        error!("Unable to initialize clients: {}", e);
        std::io::Error::other(e)
    })?;

    let (host, port) = (config.server.host.clone(), config.server.port);
    info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .into_utoipa_app()
            .configure(|cfg| api::configure(cfg, &state))
            .openapi_service(api::openapi_service)
            .into_app()
            .wrap(Logger::default())
    })
    .bind((host, port))?
    .run()
    .await
}
