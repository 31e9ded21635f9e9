use axum::{Json, extract::State};
use opsboard_core::auth;
use opsboard_model::{LoginRequest, LoginResponse};
use tracing::{info, warn};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// `POST /api/login`
///
/// Request/response only; nothing about a login is broadcast. Store failures
/// surface as a 500 carrying the raw store message.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store
        .user_by_username(&request.username)
        .await
        .map_err(|e| AppError::internal(e.to_string()))?
        .ok_or_else(|| {
            warn!(username = request.username, "login for unknown user");
            AppError::unauthorized("invalid username or password")
        })?;

    if !auth::verify_password(&request.password, &user.password_hash) {
        warn!(username = user.username, "login with wrong password");
        return Err(AppError::unauthorized("invalid username or password"));
    }

    info!(username = user.username, role = %user.role, "login succeeded");
    Ok(Json(LoginResponse {
        success: true,
        role: user.role,
        name: user.username,
    }))
}
