use crate::auth::config::{CredentialsConfig, FirebaseAuthConfig};
use dotenvy::var;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Ok(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: v })?,
            Err(_) => 8080,
        };
        Ok(Self { host, port })
    }
}

/// Endpoints of the Google services backing the admin check and the user listing.
#[derive(Clone, Debug)]
pub struct ServicesConfig {
    pub project_id: String,
    pub firestore_url: String,
    pub firestore_database: String,
    pub admins_collection: String,
    pub identity_toolkit_url: String,
    pub max_results: u32,
}

pub const MAX_LIST_RESULTS: u32 = 1000;

impl ServicesConfig {
    pub fn from_env(project_id: &str) -> Self {
        let max_results = var("LIST_USERS_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(MAX_LIST_RESULTS)
            .clamp(1, MAX_LIST_RESULTS);
        Self {
            project_id: project_id.to_string(),
            firestore_url: var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| "https://firestore.googleapis.com".to_string()),
            firestore_database: var("FIRESTORE_DATABASE")
                .unwrap_or_else(|_| "(default)".to_string()),
            admins_collection: var("ADMINS_COLLECTION").unwrap_or_else(|_| "admins".to_string()),
            identity_toolkit_url: var("IDENTITY_TOOLKIT_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".to_string()),
            max_results,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub firebase: FirebaseAuthConfig,
    pub credentials: CredentialsConfig,
    pub services: ServicesConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let server = ServerConfig::from_env()?;
        let firebase = FirebaseAuthConfig::from_env()?;
        let credentials = CredentialsConfig::from_env();
        let services = ServicesConfig::from_env(&firebase.project_id);
        Ok(Self {
            server,
            firebase,
            credentials,
            services,
        })
    }
}
