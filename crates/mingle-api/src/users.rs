use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use mingle_types::api::{UpdateUserRequest, UserProfile};

use crate::AppState;
use crate::error::ApiError;

/// Public profile lookup, consumed by the transcript renderer to show the
/// conversation partner's identity. Password and email stay private.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserProfile>, ApiError> {
    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_id(id))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UserProfile {
        id: user.id,
        name: user.name,
        surname: user.surname,
        img: user.img,
    }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    let db = state.clone();
    let changed =
        tokio::task::spawn_blocking(move || db.db.update_user_name(id, &req.first_name, &req.last_name))
            .await
            .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    if !changed {
        return Err(ApiError::NotFound("User not found".into()));
    }

    Ok(StatusCode::OK)
}
