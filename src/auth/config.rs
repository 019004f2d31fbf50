use crate::config::ConfigError;
use dotenvy::var;
use std::path::PathBuf;

pub const SECURETOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Clone, Debug)]
pub struct FirebaseAuthConfig {
    pub project_id: String,
    pub jwks_url: String,
    pub leeway_secs: u64,
    pub cache_ttl_secs: u64,
}

impl FirebaseAuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = var("FIREBASE_PROJECT_ID")
            .or_else(|_| var("GOOGLE_CLOUD_PROJECT"))
            .or_else(|_| var("GCLOUD_PROJECT"))
            .map_err(|_| ConfigError::Missing("FIREBASE_PROJECT_ID"))?;
        let jwks_url = var("FIREBASE_JWKS_URL").unwrap_or_else(|_| SECURETOKEN_JWKS_URL.to_string());
        let leeway_secs = var("FIREBASE_LEEWAY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        let cache_ttl_secs = var("FIREBASE_JWKS_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);
        Ok(Self {
            project_id,
            jwks_url,
            leeway_secs,
            cache_ttl_secs,
        })
    }
}

/// Where the service obtains OAuth2 access tokens for Google APIs.
#[derive(Clone, Debug)]
pub enum CredentialsConfig {
    ServiceAccountFile(PathBuf),
    MetadataServer { host: String },
}

impl CredentialsConfig {
    pub fn from_env() -> Self {
        match var("GOOGLE_APPLICATION_CREDENTIALS") {
            Ok(path) if !path.trim().is_empty() => Self::ServiceAccountFile(PathBuf::from(path)),
            _ => {
                let host = var("GCE_METADATA_HOST")
                    .unwrap_or_else(|_| "metadata.google.internal".to_string());
                let host = if host.starts_with("http://") || host.starts_with("https://") {
                    host
                } else {
                    format!("http://{host}")
                };
                Self::MetadataServer { host }
            }
        }
    }
}
