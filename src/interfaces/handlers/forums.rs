use actix_web::{delete, get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::forum_post::NewForumPostRequest,
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[get("")]
#[instrument(skip(state, _claims))]
pub async fn list_posts(state: web::Data<AppState>, _claims: AuthClaims) -> Result<impl Responder, AppError> {
    let posts = state.forum_handler.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[post("")]
#[instrument(skip(state, claims, body), fields(user_id = %claims.0.sub))]
pub async fn create_post(
    state: web::Data<AppState>,
    claims: AuthClaims,
    body: web::Json<NewForumPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state
        .forum_handler
        .create_post(body.into_inner(), &claims.0.user_id()?)
        .await?;
    Ok(HttpResponse::Created().json(post))
}

#[delete("/{id}")]
#[instrument(skip(state, _admin))]
pub async fn delete_post(
    state: web::Data<AppState>,
    _admin: AdminClaims,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.forum_handler.delete_post(&valid_uuid(&path.into_inner())?).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Forum post deleted successfully"})))
}
