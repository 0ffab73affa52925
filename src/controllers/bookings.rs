use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::database::Database;
use crate::dates::{self, StayDates};
use crate::error::ApiError;
use crate::middleware::{AuthUser, ValidatedJson};
use crate::models::user::normalize_email;
use crate::models::{Booking, BookingStatus, Role, Room};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(get_bookings))
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking_by_id))
}

/* ---------- helpers ---------- */

const BOOKING_WITH_ROOM: &str = r#"
    SELECT
        b.id, b.room_id, b.check_in_date, b.check_out_date,
        b.guest_name, b.guest_email, b.status, b.created_at, b.updated_at,
        r.name AS room_name, r.description AS room_description,
        r.image AS room_image, r.features AS room_features,
        r.price AS room_price, r.availability AS room_availability,
        r.created_at AS room_created_at, r.updated_at AS room_updated_at
    FROM bookings b
    JOIN rooms r ON r.id = b.room_id
"#;

/// A booking with its room joined in, the shape the site renders directly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingWithRoom {
    id: Uuid,
    room_id: Uuid,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    guest_name: String,
    guest_email: String,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    room: Room,
}

fn booking_with_room(r: &PgRow) -> Result<BookingWithRoom, sqlx::Error> {
    Ok(BookingWithRoom {
        id: r.try_get("id")?,
        room_id: r.try_get("room_id")?,
        check_in_date: r.try_get("check_in_date")?,
        check_out_date: r.try_get("check_out_date")?,
        guest_name: r.try_get("guest_name")?,
        guest_email: r.try_get("guest_email")?,
        status: r.try_get("status")?,
        created_at: r.try_get("created_at")?,
        updated_at: r.try_get("updated_at")?,
        room: Room {
            id: r.try_get("room_id")?,
            name: r.try_get("room_name")?,
            description: r.try_get("room_description")?,
            image: r.try_get("room_image")?,
            features: r.try_get("room_features")?,
            price: r.try_get("room_price")?,
            availability: r.try_get("room_availability")?,
            created_at: r.try_get("room_created_at")?,
            updated_at: r.try_get("room_updated_at")?,
        },
    })
}

async fn list_bookings(
    guest_email: Option<&str>,
    db: &Database,
) -> Result<Vec<BookingWithRoom>, sqlx::Error> {
    let query = format!("{BOOKING_WITH_ROOM} WHERE $1::text IS NULL OR b.guest_email = $1 ORDER BY b.created_at DESC");

    let rows = sqlx::query(&query)
        .bind(guest_email)
        .fetch_all(&db.pool)
        .await?;

    rows.iter().map(booking_with_room).collect()
}

/* ---------- handlers ---------- */

// POST /api/bookings
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateBookingRequest {
    room_id: Uuid,
    check_in_date: String,
    check_out_date: String,
    guest_name: String,
    #[validate(email(message = "Valid email is required"))]
    guest_email: String,
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let guest_name = req.guest_name.trim();
    if guest_name.is_empty() {
        return Err(ApiError::BadRequest("Guest name is required".to_string()));
    }
    let guest_email = normalize_email(&req.guest_email);

    let stay = StayDates::parse(&req.check_in_date, &req.check_out_date, dates::today_utc())?;

    let room = Room::find_by_id(req.room_id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("Room"))?;

    // Friendly pre-check. The exclusion constraint still decides under
    // concurrency, so racing past this never double-books.
    if Booking::has_active_overlap(room.id, &stay, &state.db).await? {
        return Err(ApiError::BookingConflict);
    }

    let booking = Booking::create(room.id, &stay, guest_name, &guest_email, &state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Booking created successfully",
            "booking": booking,
        })),
    ))
}

// GET /api/bookings
async fn get_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    // Admins see everything; guests only the bookings made with their email.
    let guest_email = match user.role {
        Role::Admin => None,
        Role::User => Some(user.email.as_str()),
    };

    let bookings = list_bookings(guest_email, &state.db).await?;
    Ok(Json(bookings))
}

// GET /api/bookings/{id}
async fn get_booking_by_id(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let query = format!("{BOOKING_WITH_ROOM} WHERE b.id = $1");

    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(&state.db.pool)
        .await?;

    let booking = match row {
        Some(ref r) => booking_with_room(r)?,
        None => return Err(ApiError::NotFound("Booking")),
    };

    if user.role != Role::Admin && booking.guest_email != user.email {
        return Err(ApiError::AccessDenied);
    }

    Ok(Json(booking))
}
