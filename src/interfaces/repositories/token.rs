use chrono::Duration;
use jsonwebtoken::TokenData;

use crate::{entities::{token::Claims, user::User}, errors::AuthError};

#[cfg_attr(test, mockall::automock)]
pub trait TokenServiceRepository: Send + Sync {
    /// Signs a session token for the user
    fn create_jwt(&self, user: &User) -> Result<String, AuthError>;

    /// Verifies signature and expiry, returning the claims
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;

    /// How long an issued token stays valid
    fn token_ttl(&self) -> Duration;
}
