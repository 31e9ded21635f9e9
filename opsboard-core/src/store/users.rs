use opsboard_model::{Role, User};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Insert a login identity. Duplicate usernames surface as
    /// [`StoreError::Conflict`].
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .execute(self.pool())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(format!("username already exists: {username}"))
            }
            _ => StoreError::Database(e),
        })?;

        let user = User {
            id: result.last_insert_rowid(),
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            role,
        };
        info!(username, id = user.id, role = %role, "created user");
        Ok(user)
    }

    pub async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, role FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        row.map(user_from_row).transpose()
    }

    pub async fn count_users(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(self.pool())
            .await?;
        Ok(row.get("n"))
    }
}

fn user_from_row(row: SqliteRow) -> Result<User> {
    let role: String = row.get("role");
    let role = role
        .parse::<Role>()
        .map_err(|e| StoreError::Validation(e.to_string()))?;

    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        role,
    })
}
