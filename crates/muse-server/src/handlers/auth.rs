//! Authentication handlers: register, login, logout, profile

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    auth::session_token, clear_session_cookie, session_cookie, AppError, AppState, AuthUser,
    SuccessResponse,
};

/// GET /api/health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /api/register - Create an account and open a session
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    // create_user validates field presence, email shape, and uniqueness.
    let user = state.db.create_user(&req.name, &req.email, &req.password)?;

    let token = state
        .db
        .create_session(user.id, chrono::Utc::now().naive_utc())?;

    info!(user = %user.name, "Account created");

    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(user),
    ))
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// POST /api/login - Verify credentials and open a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.name.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request("Name and password are required"));
    }

    let user = state
        .db
        .authenticate(&req.name, &req.password)?
        .ok_or_else(|| AppError::unauthorized("Invalid name or password"))?;

    let token = state
        .db
        .create_session(user.id, chrono::Utc::now().naive_utc())?;

    info!(user = %user.name, "Logged in");

    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(user),
    ))
}

/// POST /api/logout - Revoke the current session
pub async fn logout(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = session_token(request.headers()) {
        state.db.delete_session(&token)?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(SuccessResponse { success: true }),
    ))
}

/// GET /api/me - Current user profile
pub async fn get_me(AuthUser(user): AuthUser) -> Json<muse_core::models::User> {
    Json(user)
}

/// Request body for the reminder toggle
#[derive(Debug, Deserialize)]
pub struct UpdateRemindersRequest {
    pub enabled: bool,
}

/// PATCH /api/me/reminders - Toggle reminder digests for the caller
pub async fn update_reminders(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(req): Json<UpdateRemindersRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.set_reminders_enabled(user.id, req.enabled)?;
    Ok(Json(SuccessResponse { success: true }))
}
