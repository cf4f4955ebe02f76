use crate::{models::SqlSlot, Db};

impl Db {
    pub async fn get_slot(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query_as::<_, SqlSlot>(
            "SELECT key, value, updated_at FROM slots WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(ref slot) = row {
            tracing::debug!("Slot '{}' last written at {}", slot.key, slot.updated_at);
        }
        Ok(row.map(|r| r.value))
    }

    pub async fn save_slot(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO slots (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
