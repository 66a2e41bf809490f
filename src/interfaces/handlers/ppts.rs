use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::ppt::PptUpload,
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[get("")]
#[instrument(skip(state, _claims))]
pub async fn list_ppts(state: web::Data<AppState>, _claims: AuthClaims) -> Result<impl Responder, AppError> {
    let ppts = state.ppt_handler.list_ppts().await?;
    Ok(HttpResponse::Ok().json(ppts))
}

#[post("")]
#[instrument(skip(state, admin, form), fields(admin_id = %admin.0.sub))]
pub async fn upload_ppt(
    state: web::Data<AppState>,
    admin: AdminClaims,
    MultipartForm(form): MultipartForm<PptUpload>,
) -> Result<impl Responder, AppError> {
    let ppt = state
        .ppt_handler
        .upload_ppt(form.metadata(), &form.ppt, &admin.0.user_id()?)
        .await?;
    Ok(HttpResponse::Created().json(ppt))
}

#[delete("/{id}")]
#[instrument(skip(state, _admin))]
pub async fn delete_ppt(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.ppt_handler.delete_ppt(&valid_uuid(&path.into_inner())?).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "PPT deleted successfully"})))
}
