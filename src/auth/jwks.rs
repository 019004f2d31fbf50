use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("key not found for kid: {0}")]
    NotFound(String),
}

#[derive(Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub kty: String,
    pub n: String,
    pub e: String,
    pub alg: Option<String>,
    #[serde(rename = "use")]
    pub use_: Option<String>,
}

#[derive(Deserialize)]
struct JwksResp {
    keys: Vec<Jwk>,
}

/// Signing keys for Firebase ID tokens, keyed by `kid`.
#[derive(Clone)]
pub struct JwksCache {
    url: String,
    client: reqwest::Client,
    keys: Arc<RwLock<HashMap<String, jsonwebtoken::DecodingKey>>>,
    expiry: Arc<RwLock<Instant>>, // expiry for the whole key set
    default_ttl: Duration,
}

impl JwksCache {
    pub fn new(client: reqwest::Client, url: String, default_ttl_secs: u64) -> Self {
        Self {
            url,
            client,
            keys: Arc::new(RwLock::new(HashMap::new())),
            expiry: Arc::new(RwLock::new(Instant::now())),
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    async fn refresh(&self) -> Result<(), JwksError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| JwksError::Network(e.to_string()))?;

        let ttl = resp
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .map(Duration::from_secs)
            .unwrap_or(self.default_ttl);

        let body = resp
            .text()
            .await
            .map_err(|e| JwksError::Network(e.to_string()))?;
        let jwks: JwksResp =
            serde_json::from_str(&body).map_err(|e| JwksError::Parse(e.to_string()))?;

        let mut map = HashMap::new();
        for k in jwks.keys {
            if k.kty != "RSA" {
                continue;
            }
            match jsonwebtoken::DecodingKey::from_rsa_components(&k.n, &k.e) {
                Ok(key) => {
                    map.insert(k.kid, key);
                }
                Err(e) => warn!("jwks: skipping unusable key '{}': {}", k.kid, e),
            }
        }
        debug!("jwks: loaded {} keys, valid for {}s", map.len(), ttl.as_secs());

        *self.keys.write().await = map;
        *self.expiry.write().await = Instant::now() + ttl;
        Ok(())
    }

    pub async fn get_key(&self, kid: &str) -> Result<jsonwebtoken::DecodingKey, JwksError> {
        let expired = Instant::now() >= *self.expiry.read().await;
        if !expired {
            if let Some(k) = self.keys.read().await.get(kid) {
                return Ok(k.clone());
            }
        }

        // Expired set or unknown kid (keys rotate), fetch once more.
        if let Err(e) = self.refresh().await {
            warn!("jwks: refresh from '{}' failed: {}", self.url, e);
        }

        self.keys
            .read()
            .await
            .get(kid)
            .cloned()
            .ok_or_else(|| JwksError::NotFound(kid.to_string()))
    }
}

pub(crate) fn parse_max_age(header: &str) -> Option<u64> {
    header
        .split(',')
        .filter_map(|part| part.trim().strip_prefix("max-age="))
        .find_map(|v| v.parse::<u64>().ok())
}
