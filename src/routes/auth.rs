//! Administrator auth extractor.
//!
//! Every template route takes an `AdminUser`, so the capability check runs
//! before the handler body and before any store call. The token comes from
//! `Authorization: Bearer <token>` or, failing that, the `session_token`
//! cookie.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::extract::FromRef;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::warn;

use crate::routes::error::ApiError;
use crate::state::AppState;

pub const COOKIE_NAME: &str = "session_token";

/// Where the presented token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Bearer,
    Cookie,
}

pub(crate) fn presented_token(headers: &HeaderMap) -> Option<(String, TokenSource)> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim().to_owned())
        })
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some((token, TokenSource::Bearer));
    }

    let jar = CookieJar::from_headers(headers);
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(|token| (token.to_owned(), TokenSource::Cookie))
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Caller holding the administrator capability.
/// Use as a handler parameter to require it.
#[derive(Debug)]
pub struct AdminUser {
    pub via: TokenSource,
}

impl<S> axum::extract::FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some((token, via)) = presented_token(&parts.headers) else {
            warn!(path = %parts.uri.path(), "template request without token");
            return Err(ApiError::unauthorized());
        };

        let app_state = AppState::from_ref(state);
        if !app_state.admins.is_admin(&token) {
            warn!(path = %parts.uri.path(), ?via, "template request with unknown token");
            return Err(ApiError::forbidden());
        }

        Ok(Self { via })
    }
}
