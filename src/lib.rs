#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;

use crate::auth::{AccessTokenProvider, FirebaseTokenVerifier, JwksCache, TokenVerifier};
use crate::config::AppConfig;
use crate::db::{
    build_http_client, AuthorizationStore, FirestoreAdminStore, IdentityToolkitDirectory,
    UserDirectory,
};
use crate::services::AdminUserLister;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("credentials: {0}")]
    Credentials(#[from] auth::access_token::TokenError),
}

/// Handles shared by every request; built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub lister: Arc<AdminUserLister>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let client = build_http_client()?;
        let tokens = AccessTokenProvider::from_config(client.clone(), &config.credentials)?;

        let jwks = JwksCache::new(
            client.clone(),
            config.firebase.jwks_url.clone(),
            config.firebase.cache_ttl_secs,
        );
        let verifier = FirebaseTokenVerifier::new(config.firebase.clone(), jwks);
        let admins = FirestoreAdminStore::new(client.clone(), tokens.clone(), &config.services);
        let directory = IdentityToolkitDirectory::new(client, tokens, &config.services);

        Ok(Self::from_parts(
            Arc::new(admins),
            Arc::new(directory),
            Arc::new(verifier),
        ))
    }

    pub fn from_parts(
        admins: Arc<dyn AuthorizationStore>,
        directory: Arc<dyn UserDirectory>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        AppState {
            lister: Arc::new(AdminUserLister::new(admins, directory)),
            verifier,
        }
    }
}
