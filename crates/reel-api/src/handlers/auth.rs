//! Registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use reel_models::User;

use crate::auth::issue_token;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// `POST /api/auth/register`
///
/// Each field is validated on its own so a missing email is reported
/// even when a name is present.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    if body.email.trim().is_empty() {
        return Err(ApiError::BadRequest("email is required".to_string()));
    }
    if body.password.trim().is_empty() {
        return Err(ApiError::BadRequest("password is required".to_string()));
    }

    let password_hash = bcrypt::hash(&body.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {e}")))?;

    let user = state
        .store
        .create_user(body.name.trim(), body.email.trim(), &password_hash)?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (user, password_hash) = state
        .store
        .get_user_by_email(body.email.trim())?
        .ok_or_else(|| ApiError::Unauthorized("invalid email or password".to_string()))?;

    let ok = bcrypt::verify(&body.password, &password_hash)
        .map_err(|e| ApiError::Internal(format!("failed to verify password: {e}")))?;
    if !ok {
        return Err(ApiError::Unauthorized(
            "invalid email or password".to_string(),
        ));
    }

    let token = issue_token(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    Ok(Json(LoginResponse { token, user }))
}

/// `GET /api/auth/`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.store.list_users()?;
    Ok(Json(users))
}
