use crate::auth::caller::CallerIdentity;
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

/// The caller attached by [`crate::auth::AuthLayer`]; anonymous when there is none.
pub struct CallerContext(pub CallerIdentity);

impl FromRequest for CallerContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let caller = req
            .extensions()
            .get::<CallerIdentity>()
            .cloned()
            .unwrap_or_default();
        ready(Ok(CallerContext(caller)))
    }
}
