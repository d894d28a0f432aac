//! Calendar feed handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState, AuthUser};
use muse_core::models::CalendarEvent;

/// GET /api/calendar-events - Scheduled and Posted items with a schedule time
///
/// Items without a `scheduled_time` are skipped; the feed is chronological.
pub async fn calendar_events(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let events = state.db.list_calendar_events(user.id)?;
    Ok(Json(events))
}
