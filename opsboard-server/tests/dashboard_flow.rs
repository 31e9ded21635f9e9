mod common;

use std::sync::Arc;

use opsboard_model::{
    ClientMessage, EntryKind, ServerMessage, status,
};
use opsboard_server::{
    handlers::handle_websocket::{handle_client_message, send_init_snapshot},
    infra::websocket::Connection,
};
use serde_json::json;
use tokio::sync::mpsc;

fn attach_screen(
    app: &common::TestApp,
) -> mpsc::Receiver<ServerMessage> {
    let (tx, rx) = mpsc::channel(8);
    let conn = Arc::new(Connection::new(tx));
    app.state.connections.add_connection(conn.id, conn.clone());
    rx
}

#[tokio::test]
async fn new_connection_receives_the_seeded_snapshot() {
    let app = common::seeded_app().await;
    let (tx, mut rx) = mpsc::channel(8);
    let conn = Connection::new(tx);

    send_init_snapshot(&app.state, &conn).await;

    match rx.recv().await {
        Some(ServerMessage::Init(snapshot)) => {
            assert!(snapshot.shifts.iter().any(|s| s.name == "Sarah Connor"));
            assert!(snapshot.deliveries.iter().any(|d| d.label == "#ORD-992"));
        }
        other => panic!("expected init, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_store_skips_init_and_keeps_the_connection() {
    let state = common::unreachable_app();
    let (tx, mut rx) = mpsc::channel(8);
    let conn = Connection::new(tx);

    send_init_snapshot(&state, &conn).await;

    // No init was queued, but the channel is still usable.
    assert!(rx.try_recv().is_err());
    conn.send(ServerMessage::Init(Default::default()))
        .await
        .unwrap();
    assert!(matches!(rx.recv().await, Some(ServerMessage::Init(_))));
}

#[tokio::test]
async fn init_tolerates_a_client_that_already_left() {
    let app = common::seeded_app().await;
    let (tx, rx) = mpsc::channel(8);
    let conn = Connection::new(tx);
    drop(rx);

    // Must not error or panic.
    send_init_snapshot(&app.state, &conn).await;
}

#[tokio::test]
async fn add_worker_is_broadcast_as_a_shift() {
    let app = common::seeded_app().await;
    let mut rx = attach_screen(&app);

    handle_client_message(
        ClientMessage::AddWorker {
            name: "Kyle Reese".to_owned(),
            role: "Line Cook".to_owned(),
            time: "12:00 - 20:00".to_owned(),
        },
        &app.state,
    )
    .await
    .unwrap();

    match rx.recv().await {
        Some(ServerMessage::ShiftAdded { shift }) => {
            assert_eq!(shift.name, "Kyle Reese");
            assert_eq!(shift.status, status::SCHEDULED);
            assert!(shift.user_id.is_some());
        }
        other => panic!("expected shiftAdded, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_worker_broadcasts_nothing() {
    let app = common::seeded_app().await;
    let mut rx = attach_screen(&app);

    handle_client_message(
        ClientMessage::AddWorker {
            name: "Sarah Connor".to_owned(),
            role: "Server".to_owned(),
            time: "09:00 - 17:00".to_owned(),
        },
        &app.state,
    )
    .await
    .unwrap();

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn update_entry_is_broadcast_to_every_screen() {
    let app = common::seeded_app().await;
    let mut rx_a = attach_screen(&app);
    let mut rx_b = attach_screen(&app);

    handle_client_message(
        ClientMessage::UpdateEntry {
            category: EntryKind::Deliveries,
            id: 1,
            field: "status".to_owned(),
            value: json!("Delivered"),
        },
        &app.state,
    )
    .await
    .unwrap();

    for rx in [&mut rx_a, &mut rx_b] {
        match rx.recv().await {
            Some(ServerMessage::EntryUpdated {
                kind,
                id,
                field,
                value,
            }) => {
                assert_eq!(kind, EntryKind::Deliveries);
                assert_eq!(id, 1);
                assert_eq!(field, "status");
                assert_eq!(value, json!("Delivered"));
            }
            other => panic!("expected entryUpdated, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn unknown_field_update_broadcasts_nothing() {
    let app = common::seeded_app().await;
    let mut rx = attach_screen(&app);

    handle_client_message(
        ClientMessage::UpdateEntry {
            category: EntryKind::Shifts,
            id: 1,
            field: "user_id".to_owned(),
            value: json!(99),
        },
        &app.state,
    )
    .await
    .unwrap();

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn toggle_broadcasts_the_new_status() {
    let app = common::seeded_app().await;
    let mut rx = attach_screen(&app);

    handle_client_message(
        ClientMessage::WorkerToggleStatus {
            name: "Sarah Connor".to_owned(),
        },
        &app.state,
    )
    .await
    .unwrap();

    match rx.recv().await {
        Some(ServerMessage::EntryUpdated {
            kind, field, value, ..
        }) => {
            assert_eq!(kind, EntryKind::Shifts);
            assert_eq!(field, "status");
            assert_eq!(value, json!(status::OFF_DUTY));
        }
        other => panic!("expected entryUpdated, got {other:?}"),
    }
}

#[tokio::test]
async fn toggle_for_unknown_worker_broadcasts_nothing() {
    let app = common::seeded_app().await;
    let mut rx = attach_screen(&app);

    handle_client_message(
        ClientMessage::WorkerToggleStatus {
            name: "T-800".to_owned(),
        },
        &app.state,
    )
    .await
    .unwrap();

    assert!(rx.try_recv().is_err());
}
