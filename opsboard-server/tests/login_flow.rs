mod common;

use axum::{Json, extract::State, http::StatusCode};
use opsboard_model::{LoginRequest, Role};
use opsboard_server::handlers::login::login_handler;

#[tokio::test]
async fn seeded_admin_can_log_in() {
    let app = common::seeded_app().await;

    let Json(response) = login_handler(
        State(app.state.clone()),
        Json(LoginRequest {
            username: "admin".to_owned(),
            password: "123".to_owned(),
        }),
    )
    .await
    .unwrap();

    assert!(response.success);
    assert_eq!(response.role, Role::Admin);
    assert_eq!(response.name, "admin");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = common::seeded_app().await;

    let err = login_handler(
        State(app.state.clone()),
        Json(LoginRequest {
            username: "admin".to_owned(),
            password: "wrong".to_owned(),
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.message, "invalid username or password");
}

#[tokio::test]
async fn unknown_user_gets_the_same_rejection() {
    let app = common::seeded_app().await;

    let err = login_handler(
        State(app.state.clone()),
        Json(LoginRequest {
            username: "nobody".to_owned(),
            password: "123".to_owned(),
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.message, "invalid username or password");
}

#[tokio::test]
async fn seeded_worker_can_log_in_with_default_password() {
    let app = common::seeded_app().await;

    let Json(response) = login_handler(
        State(app.state.clone()),
        Json(LoginRequest {
            username: "Sarah Connor".to_owned(),
            password: opsboard_core::mutations::DEFAULT_WORKER_PASSWORD
                .to_owned(),
        }),
    )
    .await
    .unwrap();

    assert!(response.success);
    assert_eq!(response.role, Role::Worker);
}
