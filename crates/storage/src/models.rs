use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlSlot {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}
