use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use mingle_types::api::UploadResponse;

use crate::AppState;
use crate::error::ApiError;

/// 10 MB limit for profile images
const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// POST /upload/{id} — accepts raw image bytes, writes them under a random
/// name that preserves nothing of the client-side file name, and records the
/// name on the user row.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    bytes: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::Validation("No file provided".into()));
    }
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ApiError::Validation("File too large".into()));
    }

    let mut file_name = Uuid::new_v4().simple().to_string();
    file_name.truncate(12);

    tokio::fs::create_dir_all(&state.upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create upload dir: {}", e))?;

    let path = state.upload_dir.join(&file_name);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))?;

    let db = state.clone();
    let stored_name = file_name.clone();
    let changed = tokio::task::spawn_blocking(move || db.db.set_user_image(id, &stored_name))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    if !changed {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!("stored profile image {} for user {}", file_name, id);
    Ok(Json(UploadResponse { file_name }))
}

/// GET /uploads/{file_name} — static fetch of a stored image by name.
pub async fn get_image(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Names are server-generated hex; anything else is not a stored image.
    if file_name.is_empty() || !file_name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::NotFound("File not found".into()));
    }

    let path = state.upload_dir.join(&file_name);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound("File not found".into()));
        }
        Err(e) => {
            return Err(ApiError::Storage(anyhow::anyhow!(
                "failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], bytes))
}
