use opsboard_model::Delivery;
use tracing::info;

use crate::error::Result;
use crate::store::Store;

impl Store {
    pub async fn create_delivery(
        &self,
        label: &str,
        items: &str,
        address: &str,
        status: &str,
    ) -> Result<Delivery> {
        let result = sqlx::query(
            "INSERT INTO deliveries (label, items, address, status) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(label)
        .bind(items)
        .bind(address)
        .bind(status)
        .execute(self.pool())
        .await?;

        let delivery = Delivery {
            id: result.last_insert_rowid(),
            label: label.to_owned(),
            items: items.to_owned(),
            address: address.to_owned(),
            status: status.to_owned(),
        };
        info!(label, id = delivery.id, "created delivery");
        Ok(delivery)
    }

    pub async fn delivery_by_id(&self, id: i64) -> Result<Option<Delivery>> {
        let delivery = sqlx::query_as::<_, Delivery>(
            "SELECT id, label, items, address, status FROM deliveries WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(delivery)
    }

    pub async fn all_deliveries(&self) -> Result<Vec<Delivery>> {
        let deliveries = sqlx::query_as::<_, Delivery>(
            "SELECT id, label, items, address, status FROM deliveries ORDER BY id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(deliveries)
    }
}
