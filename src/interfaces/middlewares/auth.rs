use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{constants::AUTH_COOKIE, errors::AuthError, AppState};

/// Authenticates every non-public request from the session cookie and
/// attaches the decoded claims to the request. Role checks happen in the
/// `AdminClaims` extractor.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState missing in middleware");
                return Ok(reject(req, AuthError::MissingAppState));
            };

            let token = req.cookie(AUTH_COOKIE).map(|c| c.value().to_string());
            match state.gate.authenticate(token.as_deref()) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                }
                Err(e) => {
                    tracing::debug!(path = %req.path(), "Rejected unauthenticated request: {}", e);
                    Ok(reject(req, e))
                }
            }
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    matches!(
        (path, method),
        ("/", "GET") |
        ("/health", "GET") |
        ("/api/auth/signup", "POST") |
        ("/api/auth/login", "POST") |
        ("/api/auth/logout", "POST")
    )
}

fn reject(req: ServiceRequest, err: AuthError) -> ServiceResponse<BoxBody> {
    req.into_response(err.error_response())
}
