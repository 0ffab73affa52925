use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dates::{self, StayDates};
use crate::error::ApiError;
use crate::middleware::ValidatedJson;
use crate::models::{Booking, Room};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rooms", get(get_rooms))
        .route("/rooms/check-availability", post(check_availability))
        .route("/rooms/{id}", get(get_room_by_id))
}

// GET /api/rooms
async fn get_rooms(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let rooms = Room::find_all(&state.db).await?;
    Ok(Json(rooms))
}

// GET /api/rooms/{id}
async fn get_room_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let room = Room::find_by_id(id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("Room"))?;
    Ok(Json(room))
}

// POST /api/rooms/check-availability
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CheckAvailabilityRequest {
    room_id: Uuid,
    check_in_date: String,
    check_out_date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityResponse {
    room_id: Uuid,
    available: bool,
    check_in_date: String,
    check_out_date: String,
    message: String,
    room: Room,
}

async fn check_availability(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CheckAvailabilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let stay = StayDates::parse(&req.check_in_date, &req.check_out_date, dates::today_utc())?;

    let room = Room::find_by_id(req.room_id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("Room"))?;

    let available = !Booking::has_active_overlap(room.id, &stay, &state.db).await?;

    let message = if available {
        format!(
            "Great news! The {} is available from {} to {}.",
            room.name, stay.check_in, stay.check_out
        )
    } else {
        format!(
            "Unfortunately, the {} is not available for the selected dates. Please try different dates.",
            room.name
        )
    };

    Ok(Json(AvailabilityResponse {
        room_id: room.id,
        available,
        check_in_date: req.check_in_date,
        check_out_date: req.check_out_date,
        message,
        room,
    }))
}
