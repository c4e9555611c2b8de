//! Registration and login handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use common::error::DatabaseError;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User, UserResponse},
    password::{hash_password, verify_password},
    state::AppState,
    validation::{validate_password, validate_username},
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const USERNAME_TAKEN: &str = "Username already exists";

/// User registration endpoint
///
/// The existence check and the insert are not atomic. Two concurrent
/// registrations can both pass the check; the unique index on `username`
/// rejects the second insert and it surfaces as the same duplicate error.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;

    validate_username(&payload.username).map_err(ApiError::BadRequest)?;
    validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    if state.user_store.username_exists(&payload.username).await? {
        return Err(ApiError::Conflict(USERNAME_TAKEN.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.username, password_hash);
    state.user_store.insert(&user).await.map_err(|e| match e {
        DatabaseError::Duplicate(_) => ApiError::Conflict(USERNAME_TAKEN.to_string()),
        other => ApiError::from(other),
    })?;

    info!("Registered user {} ({})", user.username, user.id);

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user: UserResponse::from(&user),
    }))
}

/// User login endpoint
///
/// An unknown username and a wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;

    validate_username(&payload.username).map_err(ApiError::BadRequest)?;
    if payload.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }

    let user = state
        .user_store
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.jwt_service.issue_token(&user.id.to_hex())?;
    info!("User {} logged in", user.id);

    Ok(Json(LoginResponse { token }))
}
