use opsboard_model::Shift;
use tracing::info;

use crate::error::Result;
use crate::store::Store;

/// Fields for a shift about to be inserted.
#[derive(Debug, Clone)]
pub struct NewShift<'a> {
    pub user_id: Option<i64>,
    pub name: &'a str,
    pub role: &'a str,
    pub time: &'a str,
    pub status: &'a str,
}

impl Store {
    pub async fn create_shift(&self, new: NewShift<'_>) -> Result<Shift> {
        let result = sqlx::query(
            "INSERT INTO shifts (user_id, name, role, time, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(new.user_id)
        .bind(new.name)
        .bind(new.role)
        .bind(new.time)
        .bind(new.status)
        .execute(self.pool())
        .await?;

        let shift = Shift {
            id: result.last_insert_rowid(),
            user_id: new.user_id,
            name: new.name.to_owned(),
            role: new.role.to_owned(),
            time: new.time.to_owned(),
            status: new.status.to_owned(),
        };
        info!(name = shift.name, id = shift.id, "created shift");
        Ok(shift)
    }

    pub async fn shift_by_id(&self, id: i64) -> Result<Option<Shift>> {
        let shift = sqlx::query_as::<_, Shift>(
            "SELECT id, user_id, name, role, time, status FROM shifts WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(shift)
    }

    /// The shift linked to a login identity. At most one per worker in the
    /// flows this system supports; oldest wins if data predates that rule.
    pub async fn shift_by_user(&self, user_id: i64) -> Result<Option<Shift>> {
        let shift = sqlx::query_as::<_, Shift>(
            "SELECT id, user_id, name, role, time, status FROM shifts \
             WHERE user_id = ?1 ORDER BY id LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(shift)
    }

    pub async fn all_shifts(&self) -> Result<Vec<Shift>> {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT id, user_id, name, role, time, status FROM shifts ORDER BY id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(shifts)
    }
}
