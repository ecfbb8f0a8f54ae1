//! Bearer-token identity extraction.
//!
//! A missing, malformed or expired token is not an error here: the request
//! simply proceeds as anonymous, and services decide what needs a login.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use uuid::Uuid;

use blog_core::Viewer;
use blog_core::ports::{AuthError, TokenClaims};

use crate::state::AppState;

/// The user a token was issued to. The username claim is not trusted here,
/// since it goes stale when the profile is edited.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
        }
    }
}

/// Identity of the caller, if they sent a valid token.
#[derive(Debug, Clone, Default)]
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn viewer(&self) -> Viewer {
        self.0.as_ref().map(|id| id.user_id).into()
    }
}

fn identify(req: &HttpRequest) -> Result<Option<Identity>, AuthError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(AuthError::InvalidToken("Server configuration error".to_string()));
    };

    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    state.tokens.validate_token(token).map(|claims| Some(claims.into()))
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = identify(req).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "ignoring credentials; treating request as anonymous");
            None
        });

        ready(Ok(OptionalIdentity(identity)))
    }
}
