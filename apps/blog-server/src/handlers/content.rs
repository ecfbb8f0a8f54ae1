//! Feeds and post detail.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use blog_core::pagination::PageRequest;
use blog_core::services::FeedKind;

use super::views;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

async fn list(
    state: &AppState,
    req: &HttpRequest,
    identity: &OptionalIdentity,
    kind: FeedKind,
    query: &PageQuery,
) -> AppResult<HttpResponse> {
    let feed = state
        .content()
        .list_feed(
            kind,
            &identity.viewer(),
            Utc::now(),
            PageRequest::parse(query.page.as_deref()),
        )
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(HttpResponse::Ok().json(views::feed(feed)))
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    list(&state, &req, &identity, FeedKind::Home, &query).await
}

/// GET /category/{slug}/
pub async fn category_posts(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let kind = FeedKind::Category(path.into_inner());
    list(&state, &req, &identity, kind, &query).await
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let kind = FeedKind::Profile(path.into_inner());
    list(&state, &req, &identity, kind, &query).await
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state
        .content()
        .post_detail(path.into_inner(), &identity.viewer(), Utc::now())
        .await
        .map_err(AppError::at(req.path()))?;

    Ok(HttpResponse::Ok().json(views::detail(detail)))
}
