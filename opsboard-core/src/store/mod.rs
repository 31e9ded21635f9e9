//! SQLite-backed record store.
//!
//! One `Store` is opened at startup and shared by every handler; individual
//! operations acquire connections from the pool. Closing the store at
//! shutdown drains the pool.

mod appointments;
mod deliveries;
mod shifts;
mod training;
mod users;

pub use shifts::NewShift;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'worker'
);

CREATE TABLE IF NOT EXISTS shifts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER REFERENCES users(id),
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    time TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'Scheduled'
);

CREATE TABLE IF NOT EXISTS deliveries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL,
    items TEXT NOT NULL,
    address TEXT NOT NULL,
    status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS training (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic TEXT NOT NULL,
    trainer TEXT NOT NULL,
    time TEXT NOT NULL,
    attendees INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    with_name TEXT NOT NULL,
    purpose TEXT NOT NULL,
    time TEXT NOT NULL,
    location TEXT NOT NULL
);
"#;

#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the store, connecting eagerly. Fails if the database file cannot
    /// be created or opened.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(Self::options(url)?)
            .await?;
        info!(url, "connected to SQLite store");
        Ok(Self { pool })
    }

    /// Open the store without touching the database. Connection errors
    /// surface on first use, which keeps the server running degraded when the
    /// store is unavailable at startup.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(Self::options(url)?);
        Ok(Self { pool })
    }

    fn options(url: &str) -> Result<SqliteConnectOptions> {
        // foreign_keys is per-connection in SQLite; the pool applies it to
        // every connection it opens.
        Ok(SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true))
    }

    /// Create the five tables if they do not exist. Idempotent.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set a single column on one row. Returns the number of rows affected;
    /// zero (no such id) is not an error.
    ///
    /// `table` and `column` always come from the compile-time allow-list in
    /// `mutations`, never from client input.
    pub(crate) async fn update_column(
        &self,
        table: &'static str,
        column: &'static str,
        id: i64,
        value: ColumnValue,
    ) -> Result<u64> {
        let sql = format!("UPDATE {table} SET {column} = ?1 WHERE id = ?2");
        let query = sqlx::query(&sql);
        let query = match value {
            ColumnValue::Text(text) => query.bind(text),
            ColumnValue::Integer(n) => query.bind(n),
        };
        let result = query.bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// Value bound into a single-column update.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ColumnValue {
    Text(String),
    Integer(i64),
}
