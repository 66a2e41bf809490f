use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};

use crate::entities::token::Claims;
use crate::entities::user::User;
use crate::errors::AuthError;
use crate::repositories::token::TokenServiceRepository;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::days(config.jwt_expiration_days),
        }
    }

    pub fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

impl TokenServiceRepository for JwtService {
    fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        self.create_jwt(user)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        self.decode_jwt(token)
    }

    fn token_ttl(&self) -> Duration {
        self.expiration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::Role;
    use crate::settings::AppEnvironment;
    use uuid::Uuid;

    fn config(secret: &str, days: i64) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "portal".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/portal".into(),
            cors_allowed_origins: "http://localhost:5173".into(),
            jwt_secret: secret.into(),
            jwt_expiration_days: days,
            upload_dir: "uploads".into(),
            max_upload_bytes: 1024,
            allow_admin_signup: false,
        }
    }

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "asha@college.edu".into(),
            password_hash: "hash".into(),
            name: "Asha".into(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips_identity_and_role() {
        let service = JwtService::new(&config("an-hs512-secret-that-is-long-enough!!", 7));
        let admin = user(Role::Admin);

        let token = service.create_jwt(&admin).unwrap();
        let claims = service.decode_jwt(&token).unwrap().claims;

        assert_eq!(claims.user_id().unwrap(), admin.id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = JwtService::new(&config("an-hs512-secret-that-is-long-enough!!", 7));
        let verifier = JwtService::new(&config("a-completely-different-secret-value!!", 7));

        let token = issuer.create_jwt(&user(Role::Student)).unwrap();
        assert!(matches!(verifier.decode_jwt(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new(&config("an-hs512-secret-that-is-long-enough!!", -1));
        let token = service.create_jwt(&user(Role::Student)).unwrap();
        assert!(matches!(service.decode_jwt(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn garbage_is_rejected() {
        let service = JwtService::new(&config("an-hs512-secret-that-is-long-enough!!", 7));
        assert!(matches!(service.decode_jwt("not.a.jwt"), Err(AuthError::InvalidToken)));
    }
}
