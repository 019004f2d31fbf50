use crate::models::user::UserRecord;
use async_trait::async_trait;

pub mod admins;
mod errors;
pub mod users;

pub use admins::FirestoreAdminStore;
pub use errors::RepositoryError;
pub use users::IdentityToolkitDirectory;

/// Answers whether a user holds the admin flag.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    async fn is_admin(&self, uid: &str) -> Result<bool, RepositoryError>;
}

/// Read-only bulk listing of the registered user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepositoryError>;
}

pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(std::time::Duration::from_secs(30))
        .build()
}

/// Appends `segments` to `base`, each percent-encoded as one path segment.
/// Empty and dot segments are rejected rather than dropped.
pub(crate) fn api_url(base: &str, segments: &[&str]) -> Result<reqwest::Url, RepositoryError> {
    if let Some(bad) = segments.iter().find(|s| s.is_empty() || **s == "." || **s == "..") {
        return Err(RepositoryError::InvalidUrl(format!(
            "{base}: invalid path segment '{bad}'"
        )));
    }
    let mut url =
        reqwest::Url::parse(base).map_err(|e| RepositoryError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| RepositoryError::InvalidUrl(format!("{base}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
