use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dates::{self, StayDates};
use crate::error::ApiError;
use crate::middleware::{AdminUser, ValidatedJson};
use crate::models::user::normalize_email;
use crate::models::{inquiry::NewInquiry, Inquiry, InquiryStatus};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/inquiries", get(get_inquiries))
        .route("/inquiries", post(create_inquiry))
        .route("/inquiries/{id}", get(get_inquiry_by_id))
        .route("/inquiries/{id}/status", put(update_inquiry_status))
}

/* ---------- handlers ---------- */

// POST /api/inquiries
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateInquiryRequest {
    name: String,
    #[validate(email(message = "Valid email is required"))]
    email: String,
    check_in_date: String,
    check_out_date: String,
    phone: Option<String>,
    guests: Option<String>,
    message: Option<String>,
}

async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateInquiryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let stay = StayDates::parse(&req.check_in_date, &req.check_out_date, dates::today_utc())?;

    let inquiry = Inquiry::create(
        NewInquiry {
            name,
            email: &normalize_email(&req.email),
            phone: req.phone.as_deref().map(str::trim).unwrap_or(""),
            check_in_date: stay.check_in,
            check_out_date: stay.check_out,
            guests: req.guests.as_deref().map(str::trim).filter(|g| !g.is_empty()).unwrap_or("2"),
            message: req.message.as_deref().map(str::trim).unwrap_or(""),
        },
        &state.db,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Reservation inquiry submitted successfully. Our team will contact you within 24 hours.",
            "inquiry": inquiry,
        })),
    ))
}

// GET /api/inquiries
#[derive(Debug, Deserialize)]
struct InquiriesQuery {
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<String>,
}

async fn get_inquiries(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<InquiriesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, limit, offset) = super::page_window(params.page, params.limit);

    let status = match params.status.as_deref() {
        Some(s) => Some(
            s.parse::<InquiryStatus>()
                .map_err(|_| ApiError::BadRequest("Invalid status".to_string()))?,
        ),
        None => None,
    };

    let inquiries = Inquiry::list(status, limit as i64, offset, &state.db).await?;
    let total = Inquiry::count(status, &state.db).await?;
    let pages = (total + limit as i64 - 1) / limit as i64;

    Ok(Json(serde_json::json!({
        "inquiries": inquiries,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "pages": pages,
        },
    })))
}

// GET /api/inquiries/{id}
async fn get_inquiry_by_id(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = Inquiry::find_by_id(id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("Inquiry"))?;
    Ok(Json(inquiry))
}

// PUT /api/inquiries/{id}/status
#[derive(Debug, Deserialize, Validate)]
struct UpdateInquiryStatusRequest {
    status: String,
}

async fn update_inquiry_status(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateInquiryStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status: InquiryStatus = req
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid status".to_string()))?;

    let inquiry = Inquiry::update_status(id, status, &state.db)
        .await?
        .ok_or(ApiError::NotFound("Inquiry"))?;

    Ok(Json(serde_json::json!({
        "message": "Inquiry status updated successfully",
        "inquiry": inquiry,
    })))
}
