use std::{fmt, sync::Arc};

use opsboard_core::Store;

use crate::infra::{config::Config, websocket::ConnectionManager};

/// Shared handles every handler receives. The store is the single
/// process-wide database resource, injected here rather than reached through
/// module-level state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<Config>,
    pub connections: Arc<ConnectionManager>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<Store>, config: Arc<Config>) -> Self {
        Self {
            store,
            config,
            connections: Arc::new(ConnectionManager::new()),
        }
    }
}
