//! Image upload handler

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::{AppError, AppState, AuthUser, MAX_UPLOAD_SIZE};

/// Allowed image extensions for thumbnails
const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

fn allowed_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1.to_lowercase();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Some(ext)
    } else {
        None
    }
}

/// Response for image uploads
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/upload-image - Store a thumbnail image
///
/// Accepts a multipart `file` field. Files are content-addressed (SHA-256 of
/// the bytes plus the original extension), so re-uploading the same image is
/// idempotent and filenames cannot collide or traverse paths.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::bad_request("Invalid multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        if filename.is_empty() {
            return Err(AppError::bad_request("No file selected"));
        }
        let ext = allowed_extension(&filename).ok_or_else(|| {
            AppError::bad_request("Invalid file type. Allowed: png, jpg, jpeg, gif")
        })?;

        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::bad_request("Invalid request body or file too large (max 10MB)"))?;
        if data.is_empty() {
            return Err(AppError::bad_request("No file selected"));
        }
        if data.len() > MAX_UPLOAD_SIZE {
            return Err(AppError::bad_request("File too large (max 10MB)"));
        }

        let uploads_dir = &state.uploads_dir;
        if !uploads_dir.exists() {
            std::fs::create_dir_all(uploads_dir).map_err(|e| {
                AppError::internal(&format!("Failed to create uploads directory: {}", e))
            })?;
        }

        let stored_name = format!("{}.{}", hex::encode(Sha256::digest(&data)), ext);
        let path = uploads_dir.join(&stored_name);
        std::fs::write(&path, &data)
            .map_err(|e| AppError::internal(&format!("Failed to save image: {}", e)))?;

        info!(user = %user.name, file = %stored_name, bytes = data.len(), "Image uploaded");

        return Ok(Json(UploadResponse {
            url: format!("/uploads/{}", stored_name),
        }));
    }

    Err(AppError::bad_request("No file selected"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("photo.PNG"), Some("png".to_string()));
        assert_eq!(allowed_extension("clip.jpeg"), Some("jpeg".to_string()));
        assert_eq!(allowed_extension("notes.txt"), None);
        assert_eq!(allowed_extension("no-extension"), None);
    }
}
