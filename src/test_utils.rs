use crate::auth::firebase::{FirebaseAuthError, TokenVerifier, VerifiedFirebaseUser};
use crate::config::ServicesConfig;
use crate::db::{AuthorizationStore, RepositoryError, UserDirectory};
use crate::models::user::{ProviderInfo, UserRecord};
use crate::AppState;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Fixture strategy:
// - Collaborators are in-memory fakes that count their calls.
// - Bearer tokens map straight to uids through StaticTokenVerifier.
pub const TEST_PROJECT_ID: &str = "test-project";
pub const ADMIN_UID: &str = "admin-1";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const MEMBER_UID: &str = "member-1";
pub const MEMBER_TOKEN: &str = "member-token";

pub struct InMemoryAdminStore {
    admins: HashSet<String>,
    lookups: AtomicUsize,
}

impl InMemoryAdminStore {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationStore for InMemoryAdminStore {
    async fn is_admin(&self, uid: &str) -> Result<bool, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.admins.contains(uid))
    }
}

/// Admin store whose every lookup fails, as if Firestore were unreachable.
pub struct FailingAdminStore;

#[async_trait]
impl AuthorizationStore for FailingAdminStore {
    async fn is_admin(&self, _uid: &str) -> Result<bool, RepositoryError> {
        Err(RepositoryError::UnexpectedStatus {
            status: 503,
            body: "firestore unavailable".to_string(),
        })
    }
}

pub struct StaticUserDirectory {
    users: Vec<UserRecord>,
    calls: AtomicUsize,
}

impl StaticUserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.clone())
    }
}

/// Directory whose listing fails with a detailed provider error.
pub struct FailingUserDirectory;

pub const DIRECTORY_FAILURE_DETAIL: &str = "quota exceeded for project test-project";

#[async_trait]
impl UserDirectory for FailingUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        Err(RepositoryError::UnexpectedStatus {
            status: 429,
            body: DIRECTORY_FAILURE_DETAIL.to_string(),
        })
    }
}

/// Accepts a fixed set of bearer tokens, each standing for one uid.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, uid: &str) -> Self {
        self.tokens.insert(token.to_string(), uid.to_string());
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedFirebaseUser, FirebaseAuthError> {
        let uid = self
            .tokens
            .get(token)
            .ok_or_else(|| FirebaseAuthError::Verify("unknown test token".to_string()))?;
        Ok(VerifiedFirebaseUser {
            uid: uid.clone(),
            email: Some(format!("{uid}@example.com")),
        })
    }
}

pub fn services_config(firestore_url: &str, identity_toolkit_url: &str) -> ServicesConfig {
    ServicesConfig {
        project_id: TEST_PROJECT_ID.to_string(),
        firestore_url: firestore_url.to_string(),
        firestore_database: "(default)".to_string(),
        admins_collection: "admins".to_string(),
        identity_toolkit_url: identity_toolkit_url.to_string(),
        max_results: 1000,
    }
}

pub fn user_record(uid: &str, email: Option<&str>, display_name: Option<&str>) -> UserRecord {
    UserRecord {
        uid: uid.to_string(),
        email: email.map(str::to_string),
        display_name: display_name.map(str::to_string),
        ..UserRecord::default()
    }
}

fn millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
}

/// Three accounts covering every display-name fallback, in directory order.
pub fn sample_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            uid: "u-alice".to_string(),
            email: Some("alice@example.com".to_string()),
            display_name: Some("Alice Admin".to_string()),
            email_verified: true,
            disabled: false,
            // 2024-01-02T03:04:05Z
            creation_time: millis(1_704_164_645_000),
            last_sign_in_time: millis(1_704_164_645_000),
            provider_data: vec![ProviderInfo {
                uid: Some("alice@example.com".to_string()),
                provider_id: "password".to_string(),
                email: Some("alice@example.com".to_string()),
                ..ProviderInfo::default()
            }],
        },
        UserRecord {
            uid: "u-bob".to_string(),
            email: Some("bob@x.com".to_string()),
            display_name: None,
            email_verified: false,
            disabled: true,
            creation_time: millis(1_704_164_645_000),
            last_sign_in_time: None,
            provider_data: Vec::new(),
        },
        user_record("u-anon", None, None),
    ]
}

pub fn build_test_state(
    admins: Arc<dyn AuthorizationStore>,
    directory: Arc<dyn UserDirectory>,
) -> AppState {
    let verifier = StaticTokenVerifier::new()
        .with_token(ADMIN_TOKEN, ADMIN_UID)
        .with_token(MEMBER_TOKEN, MEMBER_UID);
    AppState::from_parts(admins, directory, Arc::new(verifier))
}
