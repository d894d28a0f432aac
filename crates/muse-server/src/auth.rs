//! Authenticated-principal extraction
//!
//! Handlers take [`AuthUser`] as an argument; the session token comes from the
//! `muse_session` cookie or an `Authorization: Bearer` header and is resolved
//! against the sessions table. There is no ambient current-user state.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::{AppError, AppState, SESSION_COOKIE};
use muse_core::models::User;

/// The authenticated user, resolved from the request's session token
pub struct AuthUser(pub User);

/// Pull the raw session token out of the headers, if any
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    // Bearer token first (API clients)
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    // Session cookie (browser clients)
    let cookies = headers.get(header::COOKIE).and_then(|v| v.to_str().ok())?;
    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(SESSION_COOKIE) {
            let value = parts.next().unwrap_or("").trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let user = state
            .db
            .session_user(&token, chrono::Utc::now().naive_utc())?
            .ok_or_else(|| AppError::unauthorized("Session expired or invalid"))?;

        Ok(AuthUser(user))
    }
}
