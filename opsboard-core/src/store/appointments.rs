use opsboard_model::Appointment;
use tracing::info;

use crate::error::Result;
use crate::store::Store;

impl Store {
    pub async fn create_appointment(
        &self,
        with_name: &str,
        purpose: &str,
        time: &str,
        location: &str,
    ) -> Result<Appointment> {
        let result = sqlx::query(
            "INSERT INTO appointments (with_name, purpose, time, location) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(with_name)
        .bind(purpose)
        .bind(time)
        .bind(location)
        .execute(self.pool())
        .await?;

        let appointment = Appointment {
            id: result.last_insert_rowid(),
            with_name: with_name.to_owned(),
            purpose: purpose.to_owned(),
            time: time.to_owned(),
            location: location.to_owned(),
        };
        info!(with = with_name, id = appointment.id, "created appointment");
        Ok(appointment)
    }

    pub async fn appointment_by_id(&self, id: i64) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "SELECT id, with_name, purpose, time, location FROM appointments WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(appointment)
    }

    pub async fn all_appointments(&self) -> Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            "SELECT id, with_name, purpose, time, location FROM appointments ORDER BY id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(appointments)
    }
}
