use anyhow::Result;
use opsboard_model::ServerMessage;
use std::{fmt, sync::Arc};
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

/// One connected dashboard client.
#[derive(Clone)]
pub struct Connection {
    /// Unique connection ID
    pub id: Uuid,
    /// Channel to send messages to this connection
    sender: mpsc::Sender<ServerMessage>,
    /// Last inbound activity timestamp for connection health
    last_seen: Arc<RwLock<i64>>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_seen = self.last_seen.try_read().ok().map(|guard| *guard);

        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("channel_closed", &self.sender.is_closed())
            .field("last_seen", &last_seen)
            .finish()
    }
}

impl Connection {
    pub fn new(sender: mpsc::Sender<ServerMessage>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender,
            last_seen: Arc::new(RwLock::new(chrono::Utc::now().timestamp())),
        }
    }

    /// Send a message to this connection, waiting for queue space.
    pub async fn send(&self, message: ServerMessage) -> Result<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| anyhow::anyhow!("failed to send message: channel closed"))
    }

    /// Send without waiting. Fails when the queue is full or closed.
    pub fn try_send(&self, message: ServerMessage) -> Result<()> {
        self.sender
            .try_send(message)
            .map_err(|e| anyhow::anyhow!("failed to send message: {e}"))
    }

    /// Record inbound activity (message or ping).
    pub async fn update_seen(&self) {
        *self.last_seen.write().await = chrono::Utc::now().timestamp();
    }
}
