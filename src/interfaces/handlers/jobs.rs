use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use chrono::Utc;
use tracing::instrument;

use crate::{
    entities::{
        application::NewApplicationRequest,
        job::{NewJobRequest, UpdateJobRequest},
    },
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[get("")]
#[instrument(skip(state, claims), fields(user_id = %claims.0.sub))]
pub async fn list_jobs(state: web::Data<AppState>, claims: AuthClaims) -> Result<impl Responder, AppError> {
    let jobs = state.job_handler.list_jobs(&claims.0).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/eligible")]
#[instrument(skip(state, claims), fields(user_id = %claims.0.sub))]
pub async fn eligible_jobs(state: web::Data<AppState>, claims: AuthClaims) -> Result<impl Responder, AppError> {
    let jobs = state.job_handler.eligible_jobs(&claims.0.user_id()?).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/{id}")]
#[instrument(skip(state, _claims))]
pub async fn get_job(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let job = state.job_handler.get_job(&valid_uuid(&path.into_inner())?).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[post("")]
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.sub))]
pub async fn create_job(
    state: web::Data<AppState>,
    admin: AdminClaims,
    body: web::Json<NewJobRequest>,
) -> Result<impl Responder, AppError> {
    let job = state
        .job_handler
        .create_job(body.into_inner(), &admin.0.user_id()?)
        .await?;
    Ok(HttpResponse::Created().json(job))
}

#[patch("/{id}")]
#[instrument(skip(state, _admin, body))]
pub async fn update_job(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
    body: web::Json<UpdateJobRequest>,
) -> Result<impl Responder, AppError> {
    let job = state
        .job_handler
        .update_job(&valid_uuid(&path.into_inner())?, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(job))
}

#[delete("/{id}")]
#[instrument(skip(state, _admin))]
pub async fn delete_job(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.job_handler.delete_job(&valid_uuid(&path.into_inner())?).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Job deleted successfully"})))
}

#[get("/{id}/applications")]
#[instrument(skip(state, _admin))]
pub async fn job_applications(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let applications = state
        .job_handler
        .applications_for_job(&valid_uuid(&path.into_inner())?)
        .await?;
    Ok(HttpResponse::Ok().json(applications))
}

#[post("")]
#[instrument(skip(state, claims, body), fields(user_id = %claims.0.sub, job_id = %body.job_id))]
pub async fn apply(
    state: web::Data<AppState>,
    claims: AuthClaims,
    body: web::Json<NewApplicationRequest>,
) -> Result<impl Responder, AppError> {
    let application = state
        .job_handler
        .apply(&claims.0, &body.job_id, Utc::now())
        .await?;
    Ok(HttpResponse::Created().json(application))
}

#[get("/my")]
#[instrument(skip(state, claims), fields(user_id = %claims.0.sub))]
pub async fn my_applications(state: web::Data<AppState>, claims: AuthClaims) -> Result<impl Responder, AppError> {
    let applications = state.job_handler.my_applications(&claims.0.user_id()?).await?;
    Ok(HttpResponse::Ok().json(applications))
}
