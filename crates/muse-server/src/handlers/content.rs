//! Content idea handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, AuthUser, SuccessResponse};
use muse_core::models::{ContentItem, ContentStatus, ContentUpdate, NewContentItem};
use muse_core::time::parse_schedule_time;

/// GET /api/ideas - List the caller's content, newest first
pub async fn list_ideas(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ContentItem>>, AppError> {
    let items = state.db.list_content(user.id)?;
    Ok(Json(items))
}

/// Request body for creating an idea
#[derive(Debug, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    pub platform: Option<String>,
    pub scheduled_time: Option<String>,
    pub status: Option<String>,
    pub details: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// POST /api/ideas - Create an idea
///
/// Title is required; platform defaults to "General"; `scheduled_time` is
/// optional (raw ideas are unscheduled).
pub async fn create_idea(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateIdeaRequest>,
) -> Result<Json<ContentItem>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }

    let platform = req
        .platform
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("General")
        .to_string();

    let scheduled_time = match req.scheduled_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            parse_schedule_time(s)
                .ok_or_else(|| AppError::bad_request(&format!("Invalid scheduled_time: {}", s)))?,
        ),
    };

    let status: ContentStatus = match req.status.as_deref().map(str::trim) {
        None | Some("") => ContentStatus::Idea,
        Some(s) => s
            .parse()
            .map_err(|_| AppError::bad_request("Invalid status"))?,
    };

    let item = state.db.create_content(
        user.id,
        &NewContentItem {
            title: req.title,
            platform,
            scheduled_time,
            status,
            details: req.details.unwrap_or_default(),
            thumbnail_url: req.thumbnail_url.filter(|u| !u.trim().is_empty()),
        },
    )?;

    Ok(Json(item))
}

/// Request body for a partial idea update
///
/// Absent keys are left unchanged; an empty `scheduled_time` string clears
/// the schedule.
#[derive(Debug, Deserialize)]
pub struct UpdateIdeaRequest {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub scheduled_time: Option<String>,
    pub status: Option<String>,
    pub details: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// PATCH /api/ideas/:id - Partially update an idea
pub async fn update_idea(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateIdeaRequest>,
) -> Result<Json<ContentItem>, AppError> {
    let scheduled_time = match req.scheduled_time.as_deref().map(str::trim) {
        None => None,
        Some("") => Some(None),
        Some(s) => Some(Some(parse_schedule_time(s).ok_or_else(|| {
            AppError::bad_request(&format!("Invalid scheduled_time: {}", s))
        })?)),
    };

    let status = match req.status.as_deref().map(str::trim) {
        None => None,
        Some(s) => Some(
            s.parse::<ContentStatus>()
                .map_err(|_| AppError::bad_request("Invalid status"))?,
        ),
    };

    let update = ContentUpdate {
        title: req.title,
        platform: req.platform,
        scheduled_time,
        status,
        details: req.details,
        thumbnail_url: req.thumbnail_url,
    };

    let item = state.db.update_content(user.id, id, &update)?;
    Ok(Json(item))
}

/// DELETE /api/ideas/:id - Delete an idea
pub async fn delete_idea(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_content(user.id, id)?;
    Ok(Json(SuccessResponse { success: true }))
}
