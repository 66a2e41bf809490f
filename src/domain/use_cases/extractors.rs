use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{
    entities::{token::Claims, user::Role},
    errors::AuthError,
    AppState,
};

/// Claims attached by the auth middleware. Returns 401 when the request
/// never passed authentication.
#[derive(Debug)]
pub struct AuthClaims(pub Claims);

impl FromRequest for AuthClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthClaims(claims.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

/// Claims of an administrator. 401 when unauthenticated, 403 for any other
/// role.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let Some(claims) = req.extensions().get::<Claims>().cloned() else {
            return ready(Err(AuthError::MissingCredentials.into()));
        };
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AuthError::MissingAppState.into()));
        };

        match state.gate.authorize(&claims, Role::Admin) {
            Ok(()) => ready(Ok(AdminClaims(claims))),
            Err(e) => {
                tracing::warn!(user_id = %claims.sub, "Admin access denied");
                ready(Err(e.into()))
            }
        }
    }
}
