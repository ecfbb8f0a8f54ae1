//! Commenting on posts.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use blog_shared::dto::CommentForm;

use super::{forms, views};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::redirect;
use crate::state::AppState;

/// POST /posts/{post_id}/comment/
pub async fn add(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state
        .authoring()
        .add_comment(&identity.viewer(), post_id, forms::comment(body.into_inner()), Utc::now())
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(redirect::see_other(redirect::post_detail(post_id)))
}

/// GET /posts/{post_id}/edit_comment/{comment_id}/
pub async fn edit_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .authoring()
        .comment_for_edit(&identity.viewer(), post_id, comment_id)
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(HttpResponse::Ok().json(views::comment_form(comment)))
}

/// POST /posts/{post_id}/edit_comment/{comment_id}/
pub async fn edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .authoring()
        .edit_comment(&identity.viewer(), post_id, comment_id, forms::comment(body.into_inner()))
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(redirect::see_other(redirect::post_detail(post_id)))
}

/// GET /posts/{post_id}/delete_comment/{comment_id}/
pub async fn delete_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .authoring()
        .comment_for_edit(&identity.viewer(), post_id, comment_id)
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(HttpResponse::Ok().json(views::comment_form(comment)))
}

/// POST /posts/{post_id}/delete_comment/{comment_id}/
pub async fn delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .authoring()
        .delete_comment(&identity.viewer(), post_id, comment_id)
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(redirect::see_other(redirect::post_detail(post_id)))
}
