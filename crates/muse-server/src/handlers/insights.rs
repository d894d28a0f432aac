//! Insights handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState, AuthUser};
use muse_core::insights::compute_insights;
use muse_core::models::InsightsReport;

/// GET /api/insights - Posting analytics for the caller
///
/// Recomputed fresh from the full item set on every request; never fails on
/// sparse or empty data.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<InsightsReport>, AppError> {
    let items = state.db.list_content(user.id)?;
    let report = compute_insights(&items, chrono::Utc::now().naive_utc());
    Ok(Json(report))
}
