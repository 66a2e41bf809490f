use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::event::{NewEventRequest, UpdateEventRequest},
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[get("")]
#[instrument(skip(state, _claims))]
pub async fn list_events(state: web::Data<AppState>, _claims: AuthClaims) -> Result<impl Responder, AppError> {
    let events = state.event_handler.list_events().await?;
    Ok(HttpResponse::Ok().json(events))
}

#[get("/{id}")]
#[instrument(skip(state, _claims))]
pub async fn get_event(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let event = state.event_handler.get_event(&valid_uuid(&path.into_inner())?).await?;
    Ok(HttpResponse::Ok().json(event))
}

#[post("")]
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.sub))]
pub async fn create_event(
    state: web::Data<AppState>,
    admin: AdminClaims,
    body: web::Json<NewEventRequest>,
) -> Result<impl Responder, AppError> {
    let event = state
        .event_handler
        .create_event(body.into_inner(), &admin.0.user_id()?)
        .await?;
    Ok(HttpResponse::Created().json(event))
}

#[patch("/{id}")]
#[instrument(skip(state, _admin, body))]
pub async fn update_event(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
    body: web::Json<UpdateEventRequest>,
) -> Result<impl Responder, AppError> {
    let event = state
        .event_handler
        .update_event(&valid_uuid(&path.into_inner())?, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(event))
}

#[delete("/{id}")]
#[instrument(skip(state, _admin))]
pub async fn delete_event(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.event_handler.delete_event(&valid_uuid(&path.into_inner())?).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Event deleted successfully"})))
}
