//! Error handling - RFC 7807 bodies, or redirects where the site sends the
//! visitor somewhere else instead of failing.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::error::DomainError;
use blog_shared::ErrorResponse;
use uuid::Uuid;

use crate::redirect;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Sign in first, then come back to `next`.
    LoginRequired { next: String },
    /// Not the author: back to the read-only post.
    Denied { post_id: Uuid },
    InvalidCredentials,
    Conflict(String),
    Validation(Vec<String>),
    Internal(String),
}

impl AppError {
    /// Map a domain error raised while serving `path`.
    pub fn at(path: &str) -> impl FnOnce(DomainError) -> AppError + '_ {
        move |err| match err {
            DomainError::NotFound { entity, key } => {
                AppError::NotFound(format!("{entity} '{key}' not found"))
            }
            DomainError::AuthenticationRequired => AppError::LoginRequired {
                next: path.to_string(),
            },
            DomainError::Denied { post_id } => AppError::Denied { post_id },
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::LoginRequired { next } => write!(f, "Login required for {}", next),
            AppError::Denied { post_id } => write!(f, "Not the author of post {}", post_id),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::LoginRequired { .. } | AppError::Denied { .. } => StatusCode::SEE_OTHER,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::LoginRequired { next } => return redirect::see_other(redirect::login(next)),
            AppError::Denied { post_id } => {
                tracing::debug!(%post_id, "non-author sent back to post detail");
                return redirect::see_other(redirect::post_detail(*post_id));
            }
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::InvalidCredentials => ErrorResponse::new(401, "Unauthorized")
                .with_detail("Please enter a correct username and password."),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
