use crate::infra::websocket::connection::Connection;
use dashmap::DashMap;
use opsboard_model::ServerMessage;
use std::{fmt, sync::Arc};
use tracing::debug;
use uuid::Uuid;

/// Registry of every live dashboard connection.
#[derive(Clone)]
pub struct ConnectionManager {
    connections: Arc<DashMap<Uuid, Arc<Connection>>>,
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connection_count", &self.connections.len())
            .finish()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
        }
    }

    /// Register a new connection.
    pub fn add_connection(&self, conn_id: Uuid, connection: Arc<Connection>) {
        self.connections.insert(conn_id, connection);
    }

    /// Remove a connection.
    pub fn remove_connection(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Send a message to every registered connection. Non-blocking: a client
    /// whose queue is full or closed is mid-disconnect or hopelessly behind,
    /// and must not stall delivery to the others. It misses this update and
    /// catches up from the init snapshot on reconnect.
    pub fn broadcast(&self, message: ServerMessage) {
        let connections: Vec<Arc<Connection>> =
            self.connections.iter().map(|c| c.value().clone()).collect();

        for conn in connections {
            if conn.try_send(message.clone()).is_err() {
                debug!(conn_id = %conn.id, "skipping stalled or closed connection during broadcast");
            }
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
