use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{handle_websocket, login};
use crate::infra::app_state::AppState;

/// Create the API router: the login endpoint plus the dashboard socket.
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .route("/login", post(login::login_handler))
            .route("/ws", get(handle_websocket::websocket_handler)),
    )
}
