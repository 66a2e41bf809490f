use std::sync::Arc;

use crate::{
    entities::{token::Claims, user::Role},
    errors::AuthError,
    repositories::token::TokenServiceRepository,
};

/// Authenticate-then-authorize check applied to every protected request.
///
/// Holds no per-request state; the signing secret lives in the token service
/// it is built with.
#[derive(Clone)]
pub struct AccessGate {
    token_service: Arc<dyn TokenServiceRepository>,
}

impl AccessGate {
    pub fn new(token_service: Arc<dyn TokenServiceRepository>) -> Self {
        AccessGate { token_service }
    }

    /// Verifies the token carried by the request. Absent, malformed and
    /// expired tokens all fail with an authentication error.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let claims = self.token_service.decode_jwt(token)?.claims;
        claims.user_id()?;
        Ok(claims)
    }

    pub fn authorize(&self, claims: &Claims, required: Role) -> Result<(), AuthError> {
        if claims.role == required {
            Ok(())
        } else {
            Err(AuthError::Forbidden(format!("{required} access required")))
        }
    }
}
