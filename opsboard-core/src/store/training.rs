use opsboard_model::Training;
use tracing::info;

use crate::error::Result;
use crate::store::Store;

impl Store {
    pub async fn create_training(
        &self,
        topic: &str,
        trainer: &str,
        time: &str,
        attendees: i64,
    ) -> Result<Training> {
        let result = sqlx::query(
            "INSERT INTO training (topic, trainer, time, attendees) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(topic)
        .bind(trainer)
        .bind(time)
        .bind(attendees)
        .execute(self.pool())
        .await?;

        let training = Training {
            id: result.last_insert_rowid(),
            topic: topic.to_owned(),
            trainer: trainer.to_owned(),
            time: time.to_owned(),
            attendees,
        };
        info!(topic, id = training.id, "created training session");
        Ok(training)
    }

    pub async fn training_by_id(&self, id: i64) -> Result<Option<Training>> {
        let training = sqlx::query_as::<_, Training>(
            "SELECT id, topic, trainer, time, attendees FROM training WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(training)
    }

    pub async fn all_training(&self) -> Result<Vec<Training>> {
        let sessions = sqlx::query_as::<_, Training>(
            "SELECT id, topic, trainer, time, attendees FROM training ORDER BY id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(sessions)
    }
}
