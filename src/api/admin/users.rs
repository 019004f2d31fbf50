use crate::auth::CallerContext;
use crate::enums::common::CallableErrorBody;
use crate::enums::users::{CallableRequest, ListUsersResult};
use crate::services::{AdminUserLister, ListUsersError};
use actix_web::{post, web, HttpResponse};

#[utoipa::path(
    tag = "Admin",
    request_body = CallableRequest,
    responses(
        (status = 200, description = "All registered user accounts, in directory order", body = ListUsersResult),
        (status = 400, description = "Malformed callable request", body = CallableErrorBody),
        (status = 401, description = "Caller is not authenticated", body = CallableErrorBody),
        (status = 403, description = "Caller is not an admin", body = CallableErrorBody),
        (status = 500, description = "Admin lookup or user listing failed", body = CallableErrorBody)
    ),
    summary = "List all registered user accounts"
)]
#[post("")]
pub(super) async fn list_users(
    lister: web::Data<AdminUserLister>,
    caller: CallerContext,
    _req_data: web::Json<CallableRequest>,
) -> Result<HttpResponse, ListUsersError> {
    let result = lister.list_users(&caller.0).await?;
    Ok(HttpResponse::Ok().json(ListUsersResult { result }))
}
