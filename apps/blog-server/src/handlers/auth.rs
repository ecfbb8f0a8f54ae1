//! Registration and sign-in.

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use chrono::Utc;

use blog_shared::dto::{AuthResponse, LoginRequest, RegisterRequest};

use super::forms;
use crate::middleware::error::{AppError, AppResult};
use crate::redirect;
use crate::state::AppState;

/// POST /auth/registration/
pub async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    state
        .accounts()
        .register(forms::registration(body.into_inner()), Utc::now())
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(redirect::see_other(redirect::index()))
}

/// POST /auth/login/
///
/// Issues a bearer token and points the client at its own profile.
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let credentials = body.into_inner();

    let user = state
        .accounts()
        .authenticate(&credentials.username, &credentials.password)
        .await
        .map_err(AppError::at(req.path()))?
        .ok_or(AppError::InvalidCredentials)?;

    let access_token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user logged in");

    let target = redirect::profile(&user.username);
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, target.location.clone()))
        .json(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: state.tokens.expiration_seconds(),
            redirect: target,
        }))
}
