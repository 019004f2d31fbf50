use crate::auth::AccessTokenProvider;
use crate::config::ServicesConfig;
use crate::db::{api_url, RepositoryError, UserDirectory};
use crate::models::user::{ProviderInfo, UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderUserInfo {
    provider_id: String,
    raw_id: Option<String>,
    display_name: Option<String>,
    email: Option<String>,
    photo_url: Option<String>,
    phone_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    disabled: bool,
    created_at: Option<String>,
    last_login_at: Option<String>,
    #[serde(default)]
    provider_user_info: Vec<ProviderUserInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResp {
    #[serde(default)]
    users: Vec<Account>,
    next_page_token: Option<String>,
}

/// Timestamps come back as milliseconds since the epoch, encoded as strings.
fn parse_millis(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|v| v.parse::<i64>().ok())
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

impl From<ProviderUserInfo> for ProviderInfo {
    fn from(p: ProviderUserInfo) -> Self {
        ProviderInfo {
            uid: p.raw_id,
            provider_id: p.provider_id,
            display_name: p.display_name,
            email: p.email,
            photo_url: p.photo_url,
            phone_number: p.phone_number,
        }
    }
}

impl From<Account> for UserRecord {
    fn from(a: Account) -> Self {
        UserRecord {
            creation_time: parse_millis(a.created_at.as_deref()),
            last_sign_in_time: parse_millis(a.last_login_at.as_deref()),
            uid: a.local_id,
            email: a.email,
            display_name: a.display_name,
            email_verified: a.email_verified,
            disabled: a.disabled,
            provider_data: a.provider_user_info.into_iter().map(ProviderInfo::from).collect(),
        }
    }
}

/// User accounts from the Identity Toolkit `accounts:batchGet` API.
#[derive(Clone)]
pub struct IdentityToolkitDirectory {
    client: reqwest::Client,
    tokens: AccessTokenProvider,
    base_url: String,
    project_id: String,
    max_results: u32,
}

impl IdentityToolkitDirectory {
    pub fn new(client: reqwest::Client, tokens: AccessTokenProvider, cfg: &ServicesConfig) -> Self {
        Self {
            client,
            tokens,
            base_url: cfg.identity_toolkit_url.clone(),
            project_id: cfg.project_id.clone(),
            max_results: cfg.max_results,
        }
    }
}

#[async_trait]
impl UserDirectory for IdentityToolkitDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let url = api_url(
            &self.base_url,
            &["v1", "projects", self.project_id.as_str(), "accounts:batchGet"],
        )?;
        let token = self.tokens.access_token().await?;

        let resp = self
            .client
            .get(url)
            .query(&[("maxResults", self.max_results)])
            .bearer_auth(token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(RepositoryError::from_response(resp).await);
        }

        let body = resp.text().await?;
        let page: BatchGetResp =
            serde_json::from_str(&body).map_err(|e| RepositoryError::Decode(e.to_string()))?;
        if page.next_page_token.is_some() {
            debug!(
                "list_users: directory holds more than {} accounts, returning the first page only",
                self.max_results
            );
        }
        Ok(page.users.into_iter().map(UserRecord::from).collect())
    }
}
