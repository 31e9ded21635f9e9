use std::sync::Arc;

use opsboard_core::{Store, seed};
use opsboard_server::infra::{app_state::AppState, config::Config};
use tempfile::TempDir;

/// A seeded app state backed by a throwaway database file.
pub struct TestApp {
    pub state: AppState,
    _tempdir: TempDir,
}

/// App state over a store that fails on first use: the database path points
/// into a directory that does not exist, and SQLite will not create it.
#[allow(unused)]
pub fn unreachable_app() -> AppState {
    let store =
        Store::connect_lazy("sqlite:///nonexistent/opsboard/unreachable.db")
            .unwrap();
    AppState::new(Arc::new(store), Arc::new(Config::default()))
}

#[allow(unused)]
pub async fn seeded_app() -> TestApp {
    let tempdir = TempDir::new().unwrap();
    let url = format!(
        "sqlite://{}",
        tempdir.path().join("opsboard-test.db").display()
    );
    let store = Store::connect(&url).await.unwrap();
    store.initialize_schema().await.unwrap();
    assert!(seed::run(&store).await.unwrap());

    TestApp {
        state: AppState::new(Arc::new(store), Arc::new(Config::default())),
        _tempdir: tempdir,
    }
}
