use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    get, post, web, HttpResponse, Responder,
};
use tracing::instrument;

use crate::constants::AUTH_COOKIE;
use crate::entities::user::{LoginUser, NewUser};
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let ttl = state.auth_handler.token_service.token_ttl();
    Cookie::build(AUTH_COOKIE, token)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .path("/")
        .max_age(CookieDuration::seconds(ttl.num_seconds()))
        .finish()
}

#[post("/signup")]
#[instrument(skip(state, user), fields(email = %user.email, role = %user.role))]
pub async fn signup(
    state: web::Data<AppState>,
    user: web::Json<NewUser>,
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.register(user.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn login(
    state: web::Data<AppState>,
    user: web::Json<LoginUser>,
) -> Result<impl Responder, AppError> {
    let outcome = state.auth_handler.login(user.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state, outcome.token))
        .json(outcome.response))
}

/// Clears the session cookie. The token itself stays valid until it expires.
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    let mut cookie = Cookie::build(AUTH_COOKIE, "")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .path("/")
        .finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({"message": "Logged out successfully"}))
}

#[get("/me")]
#[instrument(skip(state, claims), fields(user_id = %claims.0.sub))]
pub async fn me(state: web::Data<AppState>, claims: AuthClaims) -> Result<impl Responder, AppError> {
    let user = state.auth_handler.me(&claims.0.user_id()?).await?;
    Ok(HttpResponse::Ok().json(user))
}
