use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{http::header, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::firebase::TokenVerifier;
use crate::auth::CallerIdentity;

/// Resolves the bearer token of every request into a [`CallerIdentity`] extension.
///
/// Requests are never rejected here: a missing or unverifiable token leaves the
/// caller [`CallerIdentity::Anonymous`] and the handler decides what that means.
#[derive(Clone)]
pub struct AuthLayer {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthLayer {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(token) = bearer_token(&req) else {
            req.extensions_mut().insert(CallerIdentity::Anonymous);
            let fut = self.service.call(req);
            #[allow(clippy::redundant_async_block)]
            return Box::pin(async move { fut.await });
        };

        let verifier = self.inner.verifier.clone();
        let srv = self.service.clone();
        Box::pin(async move {
            let caller = match verifier.verify(&token).await {
                Ok(user) => {
                    debug!(
                        "auth: verified caller '{}' <{}> for {}",
                        user.uid,
                        user.email.as_deref().unwrap_or("no email"),
                        req.path()
                    );
                    CallerIdentity::Authenticated {
                        uid: user.uid,
                        email: user.email,
                    }
                }
                Err(e) => {
                    warn!("auth: rejected bearer token for {}: {}", req.path(), e);
                    CallerIdentity::Anonymous
                }
            };
            req.extensions_mut().insert(caller);
            srv.call(req).await
        })
    }
}
