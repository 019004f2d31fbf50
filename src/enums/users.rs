use crate::models::user::UserProjection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of a callable invocation. The payload under `data` is accepted and ignored.
#[derive(Deserialize, ToSchema)]
pub struct CallableRequest {
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<UserProjection>,
}

#[derive(Serialize, ToSchema)]
pub struct ListUsersResult {
    pub result: ListUsersResponse,
}
