use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use opsboard_core::{
    StoreError,
    mutations::{self, UpdateOutcome},
    snapshot,
};
use opsboard_model::{ClientMessage, EntryKind, ServerMessage};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::infra::{
    app_state::AppState,
    websocket::{Connection, messages},
};

/// Handle WebSocket upgrade request
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(64);

    let connection = Arc::new(Connection::new(tx));
    let conn_id = connection.id;
    state.connections.add_connection(conn_id, connection.clone());

    // Outgoing pump: everything queued for this client goes out here.
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(ws_msg) = messages::server_to_websocket(&msg) {
                if ws_sender.send(ws_msg).await.is_err() {
                    break;
                }
            }
        }
    });

    send_init_snapshot(&state, &connection).await;

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_)) => {
                connection.update_seen().await;
            }
            Ok(frame @ (Message::Text(_) | Message::Binary(_))) => {
                connection.update_seen().await;
                match messages::client_from_websocket(&frame) {
                    Ok(client_msg) => {
                        // Errors stay server-side; the requesting client is
                        // never told a mutation failed.
                        if let Err(e) =
                            handle_client_message(client_msg, &state).await
                        {
                            tracing::error!(error = %e, "error handling client message");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unparseable client message");
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "websocket error");
                break;
            }
            _ => {}
        }
    }

    state.connections.remove_connection(conn_id);
    tracing::debug!(%conn_id, "client disconnected");
}

/// Best-effort initial snapshot. An unreachable store must not kill the
/// connection; the client just waits for a later broadcast.
pub async fn send_init_snapshot(state: &AppState, connection: &Connection) {
    match snapshot::assemble(&state.store).await {
        Ok(snap) => {
            if connection.send(ServerMessage::Init(snap)).await.is_err() {
                tracing::debug!(conn_id = %connection.id, "client went away before init");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, conn_id = %connection.id, "no initial snapshot, store unavailable");
        }
    }
}

/// Dispatch one client message to its mutation and broadcast the change.
pub async fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::AddWorker { name, role, time } => {
            match mutations::add_worker(&state.store, &name, &role, &time).await
            {
                Ok(shift) => {
                    state
                        .connections
                        .broadcast(ServerMessage::ShiftAdded { shift });
                }
                Err(StoreError::Conflict(reason)) => {
                    // Nothing was committed; no broadcast.
                    tracing::warn!(name, reason, "addWorker aborted");
                }
                Err(e) => return Err(e.into()),
            }
        }

        ClientMessage::UpdateEntry {
            category,
            id,
            field,
            value,
        } => {
            match mutations::update_entry(&state.store, category, id, &field, &value)
                .await?
            {
                UpdateOutcome::Applied {
                    kind,
                    id,
                    field,
                    value,
                } => {
                    state
                        .connections
                        .broadcast(ServerMessage::EntryUpdated {
                            kind,
                            id,
                            field,
                            value,
                        });
                }
                // Rejections are logged by the mutation; nothing to send.
                UpdateOutcome::NotFound
                | UpdateOutcome::UnknownField
                | UpdateOutcome::InvalidValue => {}
            }
        }

        ClientMessage::WorkerToggleStatus { name } => {
            if let Some(change) =
                mutations::toggle_status(&state.store, &name).await?
            {
                state
                    .connections
                    .broadcast(ServerMessage::EntryUpdated {
                        kind: EntryKind::Shifts,
                        id: change.shift_id,
                        field: "status".to_owned(),
                        value: Value::String(change.status),
                    });
            } else {
                tracing::debug!(name, "toggle was a no-op");
            }
        }
    }

    Ok(())
}
