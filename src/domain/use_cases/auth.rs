use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::entities::profile::ProfileChanges;
use crate::entities::token::LoginResponse;
use crate::entities::user::{LoginUser, NewUser, NewUserResponse, PublicUser, Role, User};
use crate::errors::{AppError, AuthError};
use crate::repositories::{profile::ProfileRepository, token::TokenServiceRepository, user::UserRepository};

/// A signed session token plus the response body that accompanies it.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub response: LoginResponse,
}

#[derive(Clone)]
pub struct AuthHandler {
    pub user_repo: Arc<dyn UserRepository>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub token_service: Arc<dyn TokenServiceRepository>,
    pub allow_admin_signup: bool,
}

impl AuthHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        token_service: Arc<dyn TokenServiceRepository>,
        allow_admin_signup: bool,
    ) -> Self {
        AuthHandler {
            user_repo,
            profile_repo,
            token_service,
            allow_admin_signup,
        }
    }

    /// Registers a new account; students also get an empty profile.
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        if request.role == Role::Admin && !self.allow_admin_signup {
            return Err(AuthError::Forbidden("Admin self-registration is disabled".into()).into());
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let id = self.user_repo.create_user(&user_insert).await?;

        if user_insert.role == Role::Student {
            self.profile_repo.upsert_profile(&id, &ProfileChanges::default()).await?;
        }

        tracing::info!(user_id = %id, role = %user_insert.role, "User registered");
        Ok(NewUserResponse {
            id,
            message: "User created successfully".to_string(),
        })
    }

    /// Checks credentials and the requested role, then issues a token.
    pub async fn login(&self, request: LoginUser) -> Result<LoginOutcome, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let user = self.user_repo.get_user_by_email(&email)
            .await?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!("Stored password hash unusable: {}", e);
                AuthError::WrongCredentials
            })?;
        if !is_password_valid || user.role != request.role {
            return Err(AuthError::WrongCredentials.into());
        }

        let token = self.issue_token(&user)?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(LoginOutcome {
            token,
            response: LoginResponse {
                message: "Login successful".to_string(),
                user: PublicUser::from(user),
            },
        })
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        self.token_service.create_jwt(user).map_err(|e| {
            tracing::warn!("Failed to create JWT: {}", e);
            AuthError::TokenCreation
        })
    }

    pub async fn me(&self, user_id: &Uuid) -> Result<PublicUser, AppError> {
        self.user_repo
            .get_user_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}
