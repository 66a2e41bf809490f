use actix_web::{get, http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::AuthClaims, AppState};

/// Streams a stored PDF back inline. Requires an authenticated session.
#[get("/uploads/{file_name}")]
#[instrument(skip(state, _claims))]
pub async fn serve_upload(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let file_name = path.into_inner();
    let file_path = state.uploads.resolve(&file_name)?;

    let bytes = match tokio::fs::read(&file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("File not found".into()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((header::CONTENT_DISPOSITION, format!("inline; filename=\"{file_name}\"")))
        .body(bytes))
}
