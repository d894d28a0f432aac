//! Reminder handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState, AuthUser};
use muse_core::reminders::preview_body;

/// Response for the manual reminder send
#[derive(Debug, Serialize)]
pub struct TestReminderResponse {
    pub sent_to: String,
    pub items: usize,
}

/// POST /api/reminders/test - Send the caller a preview reminder email
///
/// Lists up to 5 upcoming scheduled posts; useful for validating mail
/// configuration. Returns 503 when no mailer is configured.
pub async fn test_reminder(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<TestReminderResponse>, AppError> {
    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Mail is not configured"))?;

    let upcoming = state
        .db
        .list_upcoming_for_user(user.id, chrono::Utc::now().naive_utc(), 5)?;
    let body = preview_body(&upcoming);

    mailer
        .send(&user.email, "Muse test: reminder email", &body)
        .await?;

    Ok(Json(TestReminderResponse {
        sent_to: user.email,
        items: upcoming.len(),
    }))
}
