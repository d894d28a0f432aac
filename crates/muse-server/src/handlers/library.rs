//! Library snippet handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, AuthUser, SuccessResponse};
use muse_core::models::{LibraryItem, NewLibraryItem};

/// GET /api/library - List the caller's library items, newest first
pub async fn list_library(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<LibraryItem>>, AppError> {
    let items = state.db.list_library_items(user.id)?;
    Ok(Json(items))
}

/// Request body for creating a library item
#[derive(Debug, Deserialize)]
pub struct CreateLibraryItemRequest {
    pub title: String,
    pub caption: Option<String>,
    pub hashtags: Option<String>,
    pub category: Option<String>,
}

/// POST /api/library - Create a library item
pub async fn create_library_item(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateLibraryItemRequest>,
) -> Result<Json<LibraryItem>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }

    let item = state.db.create_library_item(
        user.id,
        &NewLibraryItem {
            title: req.title,
            caption: req.caption.unwrap_or_default(),
            hashtags: req.hashtags.unwrap_or_default(),
            category: req.category.unwrap_or_default(),
        },
    )?;

    Ok(Json(item))
}

/// DELETE /api/library/:id - Delete a library item
pub async fn delete_library_item(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_library_item(user.id, id)?;
    Ok(Json(SuccessResponse { success: true }))
}
