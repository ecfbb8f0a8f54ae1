//! Editing the signed-in user's profile.

use actix_web::{HttpRequest, HttpResponse, web};

use blog_shared::dto::ProfileForm;

use super::{forms, views};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::redirect;
use crate::state::AppState;

/// GET /edit_profile/
pub async fn edit_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let user = state
        .accounts()
        .current_user(&identity.viewer())
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(HttpResponse::Ok().json(views::profile_form(user)))
}

/// POST /edit_profile/
pub async fn edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    body: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let user = state
        .accounts()
        .edit_profile(&identity.viewer(), forms::profile(body.into_inner()))
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(redirect::see_other(redirect::profile(&user.username)))
}
