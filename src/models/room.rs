use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::Database;

/// A bookable room as served by the public catalog endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub features: Vec<String>,
    pub price: f64,
    /// Administrative flag. Whether a stay actually fits is decided by the
    /// booking overlap check, not by this field.
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub async fn find_all(db: &Database) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY created_at")
            .fetch_all(&db.pool)
            .await
    }

    pub async fn find_by_id(id: Uuid, db: &Database) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&db.pool)
            .await
    }
}
