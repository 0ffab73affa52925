use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::Database;
use crate::dates::StayDates;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

/// A confirmed stay. Occupies the half-open interval
/// `[check_in_date, check_out_date)`, so a checkout and a new check-in may
/// share the same calendar day.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_name: String,
    pub guest_email: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// True if any non-cancelled booking for the room overlaps the stay.
    /// Overlap means `existing.check_in < stay.check_out` and
    /// `existing.check_out > stay.check_in`; back-to-back stays touch but
    /// never overlap.
    pub async fn has_active_overlap(
        room_id: Uuid,
        stay: &StayDates,
        db: &Database,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE room_id = $1
                  AND status <> 'cancelled'
                  AND check_in_date < $3
                  AND check_out_date > $2
            )
            "#,
        )
        .bind(room_id)
        .bind(stay.check_in)
        .bind(stay.check_out)
        .fetch_one(&db.pool)
        .await
    }

    /// Insert a confirmed booking. The `bookings_no_overlap` exclusion
    /// constraint re-checks the interval inside the database, so when two
    /// requests race past the availability pre-check only one insert lands;
    /// the loser surfaces as a booking conflict.
    pub async fn create(
        room_id: Uuid,
        stay: &StayDates,
        guest_name: &str,
        guest_email: &str,
        db: &Database,
    ) -> Result<Booking, ApiError> {
        let result = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (room_id, check_in_date, check_out_date, guest_name, guest_email, status)
            VALUES ($1, $2, $3, $4, $5, 'confirmed')
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(stay.check_in)
        .bind(stay.check_out)
        .bind(guest_name)
        .bind(guest_email)
        .fetch_one(&db.pool)
        .await;

        match result {
            Ok(booking) => Ok(booking),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23P01") => {
                Err(ApiError::BookingConflict)
            }
            Err(e) => Err(e.into()),
        }
    }
}
