use crate::auth::config::FirebaseAuthConfig;
use crate::auth::jwks::JwksCache;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;

/// Longest `sub` Firebase will ever issue.
const MAX_UID_LEN: usize = 128;

#[derive(Debug, thiserror::Error)]
pub enum FirebaseAuthError {
    #[error("token header error: {0}")]
    Header(String),
    #[error("jwks error: {0}")]
    Jwks(String),
    #[error("verification error: {0}")]
    Verify(String),
    #[error("claim mismatch: {0}")]
    Claim(String),
}

#[derive(Deserialize, Debug)]
pub struct FirebaseClaims {
    pub sub: String,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedFirebaseUser {
    pub uid: String,
    pub email: Option<String>,
}

pub async fn verify_firebase_token(
    token: &str,
    cfg: &FirebaseAuthConfig,
    cache: &JwksCache,
) -> Result<VerifiedFirebaseUser, FirebaseAuthError> {
    let header = decode_header(token).map_err(|e| FirebaseAuthError::Header(e.to_string()))?;
    let kid = header
        .kid
        .ok_or_else(|| FirebaseAuthError::Header("kid missing".to_string()))?;
    if header.alg != Algorithm::RS256 {
        return Err(FirebaseAuthError::Claim("alg must be RS256".to_string()));
    }

    let key = cache
        .get_key(&kid)
        .await
        .map_err(|e| FirebaseAuthError::Jwks(e.to_string()))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[cfg.project_id.as_str()]);
    validation.set_issuer(&[&format!(
        "https://securetoken.google.com/{}",
        cfg.project_id
    )]);
    validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
    validation.leeway = cfg.leeway_secs;

    let claims = decode::<FirebaseClaims>(token, &key, &validation)
        .map_err(|e| FirebaseAuthError::Verify(e.to_string()))?
        .claims;

    if claims.sub.is_empty() {
        return Err(FirebaseAuthError::Claim("sub must be non-empty".to_string()));
    }
    if claims.sub.len() > MAX_UID_LEN {
        return Err(FirebaseAuthError::Claim(format!(
            "sub longer than {MAX_UID_LEN} characters"
        )));
    }

    Ok(VerifiedFirebaseUser {
        uid: claims.sub,
        email: claims.email,
    })
}

/// Turns a bearer token into a verified Firebase user.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedFirebaseUser, FirebaseAuthError>;
}

#[derive(Clone)]
pub struct FirebaseTokenVerifier {
    cfg: FirebaseAuthConfig,
    jwks: JwksCache,
}

impl FirebaseTokenVerifier {
    pub fn new(cfg: FirebaseAuthConfig, jwks: JwksCache) -> Self {
        Self { cfg, jwks }
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedFirebaseUser, FirebaseAuthError> {
        verify_firebase_token(token, &self.cfg, &self.jwks).await
    }
}
