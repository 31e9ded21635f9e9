use opsboard_core::Store;
use tempfile::TempDir;

// Used by the test modules that `mod common;` this file.
#[allow(unused)]
pub struct TestStore {
    pub store: Store,
    _tempdir: TempDir,
}

/// File-backed store in a fresh temp directory. SQLite in-memory databases
/// are per-connection, which a pool would silently split; a real file keeps
/// every pooled connection on the same data.
#[allow(unused)]
pub async fn open_store() -> TestStore {
    let tempdir = tempfile::tempdir().expect("create tempdir");
    let path = tempdir.path().join("opsboard-test.db");
    let url = format!("sqlite://{}", path.display());

    let store = Store::connect(&url).await.expect("open store");
    store.initialize_schema().await.expect("initialize schema");

    TestStore {
        store,
        _tempdir: tempdir,
    }
}
