use crate::api::default_error_handler;
use crate::auth::AuthLayer;
use crate::AppState;
use actix_web::web;
use users::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

mod users;

pub fn config(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(
        scope::scope("/listUsers")
            .wrap(AuthLayer::new(state.verifier.clone()))
            .app_data(web::Data::from(state.lister.clone()))
            .app_data(web::JsonConfig::default().error_handler(default_error_handler))
            .service(list_users),
    );
}
