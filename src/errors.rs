use std::borrow::Cow;
use std::fmt;

use actix_multipart::MultipartError;
use actix_web::{
    error::{PayloadError, ResponseError},
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use jsonwebtoken::errors::{ErrorKind, Error as JwtError};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    NotFound(String),
    Conflict(String),
    Auth(AuthError),
    InvalidContentType(String),
    PayloadTooLarge(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Auth(err) => write!(f, "{}", err),
            AppError::InvalidContentType(msg) => write!(f, "Invalid content type: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            AppError::Auth(err) => return err.error_response(),
            AppError::InternalError(msg) => {
                tracing::error!("Request failed: {}", msg);
                serde_json::json!({"error": "Internal server error"})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Auth(err) => err.status_code(),
            AppError::InvalidContentType(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl AppError {
    /// Single-field validation failure, shaped like the derive output.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed(UNIQUE_VIOLATION)) => {
                AppError::Conflict("Database conflict occurred".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed(FOREIGN_KEY_VIOLATION)) => {
                AppError::NotFound("Referenced record not found".into())
            }
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

/// Maps a unique violation to a conflict carrying `message`; anything else
/// goes through the generic database mapping.
pub fn unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed(UNIQUE_VIOLATION)) => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::from(err),
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("IO error: {}", err))
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::ContentTypeIncompatible => {
                AppError::InvalidContentType("Expected multipart/form-data".to_string())
            }
            MultipartError::Payload(PayloadError::Overflow) => {
                AppError::PayloadTooLarge("File too large".to_string())
            }
            _ => AppError::InvalidInput(format!("Malformed upload: {}", err)),
        }
    }
}

#[derive(Debug, Display)]
pub enum AuthError {
    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Invalid token")]
    InvalidToken,

    #[display("Token expired")]
    TokenExpired,

    #[display("Invalid credentials")]
    WrongCredentials,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Application state unavailable")]
    MissingAppState,

    #[display("Forbidden: {_0}")]
    Forbidden(String),
}

impl AuthError {
    /// Missing, malformed and expired tokens look identical to the caller.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredentials | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            _ if self.is_authentication_failure() => {
                serde_json::json!({"error": "Authentication required"})
            }
            AuthError::Forbidden(reason) => {
                serde_json::json!({"error": "Access forbidden", "details": reason})
            }
            AuthError::TokenCreation | AuthError::MissingAppState => {
                tracing::error!("Authentication infrastructure failure: {}", self);
                serde_json::json!({"error": "Internal server error"})
            }
            _ => serde_json::json!({"error": self.to_string()}),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingAppState => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failures_share_one_response() {
        for err in [AuthError::MissingCredentials, AuthError::InvalidToken, AuthError::TokenExpired] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
            assert!(err.is_authentication_failure());
        }
        assert!(!AuthError::WrongCredentials.is_authentication_failure());
    }

    #[test]
    fn forbidden_is_distinct_from_unauthorized() {
        let err = AppError::from(AuthError::Forbidden("Admin access required".into()));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upload_errors_are_client_errors() {
        assert_eq!(AppError::InvalidContentType("pdf".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::PayloadTooLarge("big".into()).status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn only_overflowing_multipart_payloads_are_too_large() {
        let overflow = AppError::from(MultipartError::Payload(PayloadError::Overflow));
        assert_eq!(overflow.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let aborted = AppError::from(MultipartError::Payload(PayloadError::Incomplete(None)));
        assert_eq!(aborted.status_code(), StatusCode::BAD_REQUEST);
    }
}
