use crate::auth::config::CredentialsConfig;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
// Refresh a little before Google considers the token expired.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

pub const FIREBASE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/datastore",
    "https://www.googleapis.com/auth/identitytoolkit",
    "https://www.googleapis.com/auth/userinfo.email",
];

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("credentials error: {0}")]
    Credentials(String),
    #[error("signing error: {0}")]
    Signing(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("token exchange failed: {0}")]
    Exchange(String),
}

/// The fields of a Google service-account key file that matter for token exchange.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, TokenError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TokenError::Credentials(format!("cannot read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            TokenError::Credentials(format!("cannot parse '{}': {}", path.display(), e))
        })
    }

    fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(GOOGLE_TOKEN_URI)
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResp {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Clone)]
enum CredentialSource {
    ServiceAccount(ServiceAccountKey),
    MetadataServer { token_url: String },
    Fixed(String),
}

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// OAuth2 access tokens for the Google APIs this service reads from.
#[derive(Clone)]
pub struct AccessTokenProvider {
    client: reqwest::Client,
    source: CredentialSource,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

impl AccessTokenProvider {
    pub fn from_config(client: reqwest::Client, cfg: &CredentialsConfig) -> Result<Self, TokenError> {
        match cfg {
            CredentialsConfig::ServiceAccountFile(path) => {
                let key = ServiceAccountKey::from_file(path)?;
                info!("Using service account '{}' for Google APIs", key.client_email);
                Ok(Self::service_account(client, key))
            }
            CredentialsConfig::MetadataServer { host } => {
                info!("Using metadata server at {} for Google APIs", host);
                Ok(Self::metadata_server(client, host))
            }
        }
    }

    pub fn service_account(client: reqwest::Client, key: ServiceAccountKey) -> Self {
        Self::with_source(client, CredentialSource::ServiceAccount(key))
    }

    pub fn metadata_server(client: reqwest::Client, host: &str) -> Self {
        let token_url = format!(
            "{}/computeMetadata/v1/instance/service-accounts/default/token",
            host.trim_end_matches('/')
        );
        Self::with_source(client, CredentialSource::MetadataServer { token_url })
    }

    pub fn fixed(token: impl Into<String>) -> Self {
        Self::with_source(reqwest::Client::new(), CredentialSource::Fixed(token.into()))
    }

    fn with_source(client: reqwest::Client, source: CredentialSource) -> Self {
        Self {
            client,
            source,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn access_token(&self) -> Result<String, TokenError> {
        if let CredentialSource::Fixed(token) = &self.source {
            return Ok(token.clone());
        }

        if let Some(t) = self.cached.read().await.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < t.expires_at {
                return Ok(t.value.clone());
            }
        }

        let mut w = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(t) = w.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < t.expires_at {
                return Ok(t.value.clone());
            }
        }

        let resp = match &self.source {
            CredentialSource::ServiceAccount(key) => self.exchange_assertion(key).await?,
            CredentialSource::MetadataServer { token_url } => self.fetch_metadata(token_url).await?,
            CredentialSource::Fixed(token) => return Ok(token.clone()),
        };
        let ttl = Duration::from_secs(resp.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS));
        debug!("access_token: obtained token valid for {}s", ttl.as_secs());
        *w = Some(CachedToken {
            value: resp.access_token.clone(),
            expires_at: Instant::now() + ttl,
        });
        Ok(resp.access_token)
    }

    async fn exchange_assertion(&self, key: &ServiceAccountKey) -> Result<TokenResp, TokenError> {
        let assertion = sign_assertion(key)?;
        let resp = self
            .client
            .post(key.token_uri())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| TokenError::Network(e.to_string()))?;
        read_token_response(resp).await
    }

    async fn fetch_metadata(&self, token_url: &str) -> Result<TokenResp, TokenError> {
        let resp = self
            .client
            .get(token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| TokenError::Network(e.to_string()))?;
        read_token_response(resp).await
    }
}

fn sign_assertion(key: &ServiceAccountKey) -> Result<String, TokenError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| TokenError::Signing(e.to_string()))?
        .as_secs();
    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: FIREBASE_SCOPES.join(" "),
        aud: key.token_uri(),
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();
    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| TokenError::Credentials(format!("invalid private key: {e}")))?;
    encode(&header, &claims, &signing_key).map_err(|e| TokenError::Signing(e.to_string()))
}

async fn read_token_response(resp: reqwest::Response) -> Result<TokenResp, TokenError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| TokenError::Network(e.to_string()))?;
    if !status.is_success() {
        return Err(TokenError::Exchange(format!("{status}: {body}")));
    }
    serde_json::from_str(&body).map_err(|e| TokenError::Exchange(e.to_string()))
}
