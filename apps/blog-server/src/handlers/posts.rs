//! Creating, editing and deleting posts.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use blog_core::policy::require_authenticated;
use blog_shared::dto::PostForm;

use super::{forms, views};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::redirect;
use crate::state::AppState;

/// GET /posts/create/
pub async fn create_form(req: HttpRequest, identity: OptionalIdentity) -> AppResult<HttpResponse> {
    require_authenticated(&identity.viewer()).map_err(AppError::at(req.path()))?;
    Ok(HttpResponse::Ok().json(PostForm::blank(Utc::now())))
}

/// POST /posts/create/
pub async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let here = req.path();

    state
        .authoring()
        .create_post(&viewer, forms::post(body.into_inner()), Utc::now())
        .await
        .map_err(AppError::at(here))?;
    let author = state
        .accounts()
        .current_user(&viewer)
        .await
        .map_err(AppError::at(here))?;

    Ok(redirect::see_other(redirect::profile(&author.username)))
}

/// GET /posts/{post_id}/edit/
pub async fn edit_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .authoring()
        .post_for_edit(&identity.viewer(), path.into_inner())
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(HttpResponse::Ok().json(views::post_form(post)))
}

/// POST /posts/{post_id}/edit/
pub async fn edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post = state
        .authoring()
        .edit_post(&identity.viewer(), path.into_inner(), forms::post(body.into_inner()))
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(redirect::see_other(redirect::post_detail(post.id)))
}

/// GET /posts/{post_id}/delete/
pub async fn delete_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .authoring()
        .post_for_edit(&identity.viewer(), path.into_inner())
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(HttpResponse::Ok().json(views::post_form(post)))
}

/// POST /posts/{post_id}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let here = req.path();

    state
        .authoring()
        .delete_post(&viewer, path.into_inner())
        .await
        .map_err(AppError::at(here))?;
    let author = state
        .accounts()
        .current_user(&viewer)
        .await
        .map_err(AppError::at(here))?;

    Ok(redirect::see_other(redirect::profile(&author.username)))
}
