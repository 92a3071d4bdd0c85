use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use mingle_types::api::{AddFriendRequest, FriendEntry, FriendListResponse};

use crate::AppState;
use crate::error::ApiError;

pub async fn add_friend(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<AddFriendRequest>,
) -> Result<StatusCode, ApiError> {
    let friend_id = req.friend_id;

    let db = state.clone();
    tokio::task::spawn_blocking(move || {
        if db.db.get_user_by_id(user_id)?.is_none() {
            return Err(ApiError::NotFound("User not found".into()));
        }
        if db.db.get_user_by_id(friend_id)?.is_none() {
            return Err(ApiError::NotFound("Friend not found".into()));
        }
        if db.db.are_friends(user_id, friend_id)? {
            return Err(ApiError::AlreadyExists("Users are already friends".into()));
        }
        db.db.add_friend(user_id, friend_id)?;
        Ok(())
    })
    .await
    .map_err(|e| ApiError::Storage(anyhow::anyhow!("spawn_blocking join error: {}", e)))??;

    Ok(StatusCode::OK)
}

pub async fn friend_list(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<FriendListResponse>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || {
        if db.db.get_user_by_id(user_id)?.is_none() {
            return Err(ApiError::NotFound("User not found".into()));
        }
        Ok(db.db.friend_list(user_id)?)
    })
    .await
    .map_err(|e| ApiError::Storage(anyhow::anyhow!("spawn_blocking join error: {}", e)))??;

    let friend_list = rows
        .into_iter()
        .map(|row| FriendEntry {
            id: row.id,
            name: row.name,
        })
        .collect();

    Ok(Json(FriendListResponse { friend_list }))
}
