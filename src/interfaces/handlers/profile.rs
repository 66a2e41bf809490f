use actix_multipart::form::MultipartForm;
use actix_web::{get, patch, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::profile::{ResumeUpload, ResumeUploadResponse, UpdateProfileRequest},
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[get("/profile")]
#[instrument(skip(state, claims), fields(user_id = %claims.0.sub))]
pub async fn get_profile(state: web::Data<AppState>, claims: AuthClaims) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler.get_profile(&claims.0.user_id()?).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[patch("/profile")]
#[instrument(skip(state, claims, body), fields(user_id = %claims.0.sub))]
pub async fn update_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
    body: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, AppError> {
    let profile = state
        .profile_handler
        .update_profile(&claims.0.user_id()?, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[post("/profile/resume")]
#[instrument(skip(state, claims, form), fields(user_id = %claims.0.sub))]
pub async fn upload_resume(
    state: web::Data<AppState>,
    claims: AuthClaims,
    MultipartForm(form): MultipartForm<ResumeUpload>,
) -> Result<impl Responder, AppError> {
    let file_url = state
        .profile_handler
        .upload_resume(&claims.0.user_id()?, &form.resume)
        .await?;

    Ok(HttpResponse::Ok().json(ResumeUploadResponse {
        message: "Resume uploaded successfully".to_string(),
        file_url,
    }))
}

#[get("/students/{user_id}/profile")]
#[instrument(skip(state, _admin))]
pub async fn get_student_profile(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let student_id = valid_uuid(&path.into_inner())?;
    let profile = state.profile_handler.get_student_profile(&student_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[patch("/students/{user_id}/profile")]
#[instrument(skip(state, _admin, body))]
pub async fn update_student_profile(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, AppError> {
    let student_id = valid_uuid(&path.into_inner())?;
    let profile = state
        .profile_handler
        .update_student_profile(&student_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}
