use crate::enums::common::{CallableErrorBody, CallableErrorDetail, ErrorStatus};
use crate::services::ListUsersError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse, ResponseError};

fn status_code(status: ErrorStatus) -> StatusCode {
    StatusCode::from_u16(status.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn callable_error(status: ErrorStatus, message: &str) -> HttpResponse {
    HttpResponse::build(status_code(status)).json(CallableErrorBody {
        error: CallableErrorDetail {
            status,
            message: message.to_string(),
        },
    })
}

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    actix_web::error::InternalError::from_response(
        "",
        callable_error(ErrorStatus::InvalidArgument, "Bad Request"),
    )
    .into()
}

impl ResponseError for ListUsersError {
    fn status_code(&self) -> StatusCode {
        status_code(self.status())
    }

    fn error_response(&self) -> HttpResponse {
        callable_error(self.status(), &self.to_string())
    }
}
