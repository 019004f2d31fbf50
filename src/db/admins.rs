use crate::auth::AccessTokenProvider;
use crate::config::ServicesConfig;
use crate::db::{api_url, AuthorizationStore, RepositoryError};
use async_trait::async_trait;
use reqwest::StatusCode;

/// Firestore's upper bound on a document ID, in bytes.
const MAX_DOCUMENT_ID_BYTES: usize = 1500;

/// Whether `id` can name a Firestore document. Anything else would address a
/// different resource (`.` and `..` collapse into the collection path).
fn is_document_id(id: &str) -> bool {
    let reserved = id.len() >= 4 && id.starts_with("__") && id.ends_with("__");
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains('/')
        && !reserved
        && id.len() <= MAX_DOCUMENT_ID_BYTES
}

/// Admin flags stored as Firestore documents: `{collection}/{uid}` exists for every admin.
#[derive(Clone)]
pub struct FirestoreAdminStore {
    client: reqwest::Client,
    tokens: AccessTokenProvider,
    base_url: String,
    project_id: String,
    database: String,
    collection: String,
}

impl FirestoreAdminStore {
    pub fn new(client: reqwest::Client, tokens: AccessTokenProvider, cfg: &ServicesConfig) -> Self {
        Self {
            client,
            tokens,
            base_url: cfg.firestore_url.clone(),
            project_id: cfg.project_id.clone(),
            database: cfg.firestore_database.clone(),
            collection: cfg.admins_collection.clone(),
        }
    }
}

#[async_trait]
impl AuthorizationStore for FirestoreAdminStore {
    async fn is_admin(&self, uid: &str) -> Result<bool, RepositoryError> {
        if !is_document_id(uid) {
            debug!("is_admin: '{}' is not a valid document id, not an admin", uid);
            return Ok(false);
        }
        let url = api_url(
            &self.base_url,
            &[
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                self.database.as_str(),
                "documents",
                self.collection.as_str(),
                uid,
            ],
        )?;
        let token = self.tokens.access_token().await?;

        let resp = self.client.get(url).bearer_auth(token).send().await?;
        match resp.status() {
            StatusCode::OK => {
                debug!("is_admin: '{}' found in '{}'", uid, self.collection);
                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                debug!("is_admin: '{}' not found in '{}'", uid, self.collection);
                Ok(false)
            }
            _ => Err(RepositoryError::from_response(resp).await),
        }
    }
}
