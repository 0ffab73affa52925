use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "inquiry_status", rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Contacted,
    Booked,
    Cancelled,
}

impl FromStr for InquiryStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InquiryStatus::Pending),
            "contacted" => Ok(InquiryStatus::Contacted),
            "booked" => Ok(InquiryStatus::Booked),
            "cancelled" => Ok(InquiryStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// A reservation request left through the contact form. Tracked by staff
/// through the status workflow; never blocks a room.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: String,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewInquiry<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: &'a str,
    pub message: &'a str,
}

impl Inquiry {
    pub async fn create(new: NewInquiry<'_>, db: &Database) -> Result<Inquiry, sqlx::Error> {
        sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (name, email, phone, check_in_date, check_out_date, guests, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.check_in_date)
        .bind(new.check_out_date)
        .bind(new.guests)
        .bind(new.message)
        .fetch_one(&db.pool)
        .await
    }

    pub async fn find_by_id(id: Uuid, db: &Database) -> Result<Option<Inquiry>, sqlx::Error> {
        sqlx::query_as::<_, Inquiry>("SELECT * FROM inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&db.pool)
            .await
    }

    /// Newest first, optionally narrowed to one status.
    pub async fn list(
        status: Option<InquiryStatus>,
        limit: i64,
        offset: i64,
        db: &Database,
    ) -> Result<Vec<Inquiry>, sqlx::Error> {
        sqlx::query_as::<_, Inquiry>(
            r#"
            SELECT * FROM inquiries
            WHERE $1::inquiry_status IS NULL OR status = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&db.pool)
        .await
    }

    pub async fn count(status: Option<InquiryStatus>, db: &Database) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inquiries WHERE $1::inquiry_status IS NULL OR status = $1",
        )
        .bind(status)
        .fetch_one(&db.pool)
        .await
    }

    pub async fn update_status(
        id: Uuid,
        status: InquiryStatus,
        db: &Database,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        sqlx::query_as::<_, Inquiry>(
            "UPDATE inquiries SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&db.pool)
        .await
    }
}
