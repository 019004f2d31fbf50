use crate::auth::CallerIdentity;
use crate::db::{AuthorizationStore, UserDirectory};
use crate::enums::common::ErrorStatus;
use crate::enums::users::ListUsersResponse;
use crate::models::user::UserProjection;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListUsersError {
    #[error("User must be authenticated")]
    Unauthenticated,
    #[error("User is not an admin")]
    PermissionDenied,
    #[error("Error listing users")]
    Internal,
}

impl ListUsersError {
    pub fn status(&self) -> ErrorStatus {
        match self {
            ListUsersError::Unauthenticated => ErrorStatus::Unauthenticated,
            ListUsersError::PermissionDenied => ErrorStatus::PermissionDenied,
            ListUsersError::Internal => ErrorStatus::Internal,
        }
    }
}

/// Lists every registered account on behalf of an admin caller.
#[derive(Clone)]
pub struct AdminUserLister {
    admins: Arc<dyn AuthorizationStore>,
    directory: Arc<dyn UserDirectory>,
}

impl AdminUserLister {
    pub fn new(admins: Arc<dyn AuthorizationStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { admins, directory }
    }

    /// Checks the caller's admin flag, then returns the projected directory
    /// contents in directory order. Collaborator failures are logged and
    /// reported as [`ListUsersError::Internal`] without their details.
    pub async fn list_users(
        &self,
        caller: &CallerIdentity,
    ) -> Result<ListUsersResponse, ListUsersError> {
        let Some(uid) = caller.uid() else {
            debug!("list_users: rejected unauthenticated caller");
            return Err(ListUsersError::Unauthenticated);
        };

        match self.admins.is_admin(uid).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    "list_users: caller '{}' <{}> is not an admin",
                    uid,
                    caller.email().unwrap_or("no email")
                );
                return Err(ListUsersError::PermissionDenied);
            }
            Err(e) => {
                error!("list_users: admin lookup failed for caller '{}': {}", uid, e);
                return Err(ListUsersError::Internal);
            }
        }

        let records = self.directory.list_users().await.map_err(|e| {
            error!("list_users: directory listing failed for caller '{}': {}", uid, e);
            ListUsersError::Internal
        })?;

        let users: Vec<UserProjection> = records.into_iter().map(UserProjection::from).collect();
        info!(
            "list_users: returning {} users to admin '{}' <{}>",
            users.len(),
            uid,
            caller.email().unwrap_or("no email")
        );
        Ok(ListUsersResponse { users })
    }
}
