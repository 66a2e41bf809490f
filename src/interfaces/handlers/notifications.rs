use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::notification::NewNotificationRequest,
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    AppState,
};

#[get("")]
#[instrument(skip(state, _claims))]
pub async fn list_notifications(state: web::Data<AppState>, _claims: AuthClaims) -> Result<impl Responder, AppError> {
    let notifications = state.notification_handler.list_notifications().await?;
    Ok(HttpResponse::Ok().json(notifications))
}

#[post("")]
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.sub))]
pub async fn broadcast_notification(
    state: web::Data<AppState>,
    admin: AdminClaims,
    body: web::Json<NewNotificationRequest>,
) -> Result<impl Responder, AppError> {
    let notification = state
        .notification_handler
        .broadcast(body.into_inner(), &admin.0.user_id()?)
        .await?;
    Ok(HttpResponse::Created().json(notification))
}
