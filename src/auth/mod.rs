pub mod access_token;
pub mod caller;
pub mod config;
pub mod extractors;
pub mod firebase;
pub mod jwks;
pub mod middleware;

pub use access_token::AccessTokenProvider;
pub use caller::CallerIdentity;
pub use config::{CredentialsConfig, FirebaseAuthConfig};
pub use extractors::CallerContext;
pub use firebase::{FirebaseTokenVerifier, TokenVerifier};
pub use jwks::JwksCache;
pub use middleware::AuthLayer;
