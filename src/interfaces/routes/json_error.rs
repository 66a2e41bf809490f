use actix_multipart::form::MultipartFormConfig;
use actix_web::{
    web,
    http::StatusCode,
    ResponseError,
    HttpResponse,
    error::JsonPayloadError,
};
use serde_json::json;

use crate::errors::AppError;

/// Multipart bodies may carry this much on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        JsonError::from(err).into()
    }));

    cfg.app_data(
        MultipartFormConfig::default()
            .total_limit(max_upload_bytes + MULTIPART_OVERHEAD)
            .error_handler(|err, _req| AppError::from(err).into()),
    );
}

#[derive(Debug)]
pub struct JsonError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        let status = match &err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        JsonError {
            message: format!("Invalid JSON body: {}", err),
            status,
        }
    }
}
