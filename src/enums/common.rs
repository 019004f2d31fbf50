use serde::Serialize;
use utoipa::ToSchema;

/// Failure statuses of the callable protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorStatus {
    InvalidArgument,
    Unauthenticated,
    PermissionDenied,
    Internal,
}

impl ErrorStatus {
    /// Client-facing error code, e.g. `permission-denied`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorStatus::InvalidArgument => "invalid-argument",
            ErrorStatus::Unauthenticated => "unauthenticated",
            ErrorStatus::PermissionDenied => "permission-denied",
            ErrorStatus::Internal => "internal",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ErrorStatus::InvalidArgument => 400,
            ErrorStatus::Unauthenticated => 401,
            ErrorStatus::PermissionDenied => 403,
            ErrorStatus::Internal => 500,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CallableErrorDetail {
    pub status: ErrorStatus,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct CallableErrorBody {
    pub error: CallableErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResp {
    pub status: String,
}
