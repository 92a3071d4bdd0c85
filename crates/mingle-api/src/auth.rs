use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use mingle_types::api::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

use crate::AppState;
use crate::error::ApiError;

/// Short opaque public id, distinct from the numeric row id.
fn new_uid() -> String {
    let mut uid = Uuid::new_v4().simple().to_string();
    uid.truncate(20);
    uid
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    let uid = new_uid();

    let db = state.clone();
    let stored_uid = uid.clone();
    tokio::task::spawn_blocking(move || {
        db.db.create_user(
            &stored_uid,
            &req.email,
            &password_hash,
            &req.name,
            &req.surname,
        )
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    Ok(Json(SignupResponse { uid }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let db = state.clone();
    let email = req.email.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_email(&email))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??
        .ok_or(ApiError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored password hash is corrupt: {}", e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized)?;

    Ok(Json(LoginResponse {
        id: user.id,
        uid: user.uid,
        name: user.name,
        surname: user.surname,
        email: user.email,
        img: user.img,
    }))
}
