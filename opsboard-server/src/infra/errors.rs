use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Client-facing failures use `message`; server failures expose the
        // raw error under `error`.
        let body = if self.status.is_server_error() {
            Json(json!({ "success": false, "error": self.message }))
        } else {
            Json(json!({ "success": false, "message": self.message }))
        };

        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_uses_message_key() {
        let err = AppError::unauthorized("invalid username or password");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert!(!err.status.is_server_error());
    }

    #[test]
    fn internal_errors_are_5xx() {
        let err = AppError::internal("database error: locked");
        assert!(err.status.is_server_error());
    }
}
