//! Export handlers

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::{AppError, AppState, AuthUser};
use muse_core::export::export_content_csv;

/// GET /api/export/content - Download the caller's content as CSV
pub async fn export_content(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let items = state.db.list_content(user.id)?;

    let mut out = Vec::new();
    export_content_csv(&items, &mut out)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"content.csv\"",
            ),
        ],
        out,
    ))
}
