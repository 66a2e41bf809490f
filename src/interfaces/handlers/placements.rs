use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::placement::NewPlacementRequest,
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    AppState,
};

#[get("")]
#[instrument(skip(state, _claims))]
pub async fn list_placements(state: web::Data<AppState>, _claims: AuthClaims) -> Result<impl Responder, AppError> {
    let placements = state.placement_handler.list_placements().await?;
    Ok(HttpResponse::Ok().json(placements))
}

#[get("/stats")]
#[instrument(skip(state, _claims))]
pub async fn placement_stats(state: web::Data<AppState>, _claims: AuthClaims) -> Result<impl Responder, AppError> {
    let stats = state.placement_handler.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[post("")]
#[instrument(skip(state, admin, body), fields(admin_id = %admin.0.sub))]
pub async fn record_placement(
    state: web::Data<AppState>,
    admin: AdminClaims,
    body: web::Json<NewPlacementRequest>,
) -> Result<impl Responder, AppError> {
    let placement = state
        .placement_handler
        .record_placement(body.into_inner(), &admin.0.user_id()?)
        .await?;
    Ok(HttpResponse::Created().json(placement))
}
