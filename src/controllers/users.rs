use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth;
use crate::error::ApiError;
use crate::middleware::{ensure_admin_or_owner, AdminUser, AuthUser, ValidatedJson};
use crate::models::user::{hash_password, normalize_email};
use crate::models::{Role, User, UserResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/me", get(get_me))
        .route("/users/me", put(update_me))
        .route("/users/me/password", put(change_password))
        .route("/users", get(get_users))
        .route("/users/{user_id}", get(get_user_by_id))
        .route("/users/{user_id}", put(update_user))
        .route("/users/{user_id}", delete(delete_user))
        .route("/users/{user_id}/status", put(update_user_status))
}

/* ---------- helpers ---------- */

/// Resolve the optional new email for an account edit: normalized, and
/// checked against every other account.
async fn resolve_new_email(
    requested: Option<&str>,
    account_id: Uuid,
    state: &AppState,
) -> Result<Option<String>, ApiError> {
    let Some(requested) = requested else {
        return Ok(None);
    };

    let email = normalize_email(requested);
    if User::email_taken(&email, Some(account_id), &state.db).await? {
        return Err(ApiError::BadRequest("Email already in use".to_string()));
    }
    Ok(Some(email))
}

/* ---------- auth ---------- */

// POST /api/users/register
#[derive(Debug, Deserialize, Validate)]
struct RegisterRequest {
    name: String,
    #[validate(email(message = "Valid email is required"))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let email = normalize_email(&req.email);
    if User::email_taken(&email, None, &state.db).await? {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let password_hash = hash_password(&req.password).await?;
    let user = User::create(name, &email, &password_hash, &state.db).await?;
    let token = auth::issue_token(user.id, &state.config.jwt)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully",
            "user": {
                "id": user.id,
                "name": user.name,
                "email": user.email,
            },
            "token": token,
        })),
    ))
}

// POST /api/users/login
#[derive(Debug, Deserialize, Validate)]
struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Unknown email and wrong password answer identically.
    let user = User::find_by_email(&req.email, &state.db)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !user.verify_password(&req.password).await? {
        return Err(ApiError::InvalidCredentials);
    }

    if !user.is_active {
        return Err(ApiError::AccountDeactivated);
    }

    User::touch_last_login(user.id, &state.db).await?;
    let token = auth::issue_token(user.id, &state.config.jwt)?;

    Ok(Json(serde_json::json!({
        "message": "Login successful",
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
            "phone": user.phone,
        },
        "token": token,
    })))
}

/* ---------- own account ---------- */

// GET /api/users/me
async fn get_me(AuthUser(user): AuthUser) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(UserResponse::from(user)))
}

// PUT /api/users/me
#[derive(Debug, Deserialize, Validate)]
struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    name: Option<String>,
    phone: Option<String>,
    #[validate(email(message = "Valid email is required"))]
    email: Option<String>,
}

async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = resolve_new_email(req.email.as_deref(), user.id, &state).await?;

    let updated = User::update_fields(
        user.id,
        req.name.as_deref().map(str::trim).filter(|n| !n.is_empty()),
        req.phone.as_deref().map(str::trim),
        email.as_deref(),
        None,
        None,
        &state.db,
    )
    .await?
    .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(serde_json::json!({
        "message": "Profile updated successfully",
        "user": {
            "id": updated.id,
            "name": updated.name,
            "email": updated.email,
            "phone": updated.phone,
            "role": updated.role,
        },
    })))
}

// PUT /api/users/me/password
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    current_password: String,
    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    new_password: String,
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.verify_password(&req.current_password).await? {
        return Err(ApiError::WrongPassword);
    }

    let password_hash = hash_password(&req.new_password).await?;
    User::set_password(user.id, &password_hash, &state.db).await?;

    Ok(Json(serde_json::json!({
        "message": "Password changed successfully",
    })))
}

/* ---------- administration ---------- */

// GET /api/users
#[derive(Debug, Deserialize)]
struct UsersQuery {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
}

async fn get_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<UsersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, limit, offset) = super::page_window(params.page, params.limit);
    let search = params.search.unwrap_or_default();

    let users: Vec<UserResponse> = User::list(&search, limit as i64, offset, &state.db)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    let total = User::count(&search, &state.db).await?;
    let pages = (total + limit as i64 - 1) / limit as i64;

    Ok(Json(serde_json::json!({
        "users": users,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "pages": pages,
        },
    })))
}

// GET /api/users/{user_id}
async fn get_user_by_id(
    State(state): State<Arc<AppState>>,
    AuthUser(requester): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_admin_or_owner(&requester, user_id)?;

    let user = User::find_by_id(user_id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(UserResponse::from(user)))
}

// PUT /api/users/{user_id}
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct AdminUpdateUserRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    name: Option<String>,
    #[validate(email(message = "Valid email is required"))]
    email: Option<String>,
    phone: Option<String>,
    role: Option<String>,
    is_active: Option<bool>,
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let target = User::find_by_id(user_id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let role = match req.role.as_deref() {
        Some(r) => Some(
            r.parse::<Role>()
                .map_err(|_| ApiError::BadRequest("Invalid role".to_string()))?,
        ),
        None => None,
    };

    let email = resolve_new_email(req.email.as_deref(), target.id, &state).await?;

    let updated = User::update_fields(
        target.id,
        req.name.as_deref().map(str::trim).filter(|n| !n.is_empty()),
        req.phone.as_deref().map(str::trim),
        email.as_deref(),
        role,
        req.is_active,
        &state.db,
    )
    .await?
    .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(serde_json::json!({
        "message": "User updated successfully",
        "user": {
            "id": updated.id,
            "name": updated.name,
            "email": updated.email,
            "phone": updated.phone,
            "role": updated.role,
            "isActive": updated.is_active,
        },
    })))
}

// DELETE /api/users/{user_id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let target = User::find_by_id(user_id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if target.id == admin.id {
        return Err(ApiError::BadRequest("Cannot delete your own account".to_string()));
    }

    User::delete(target.id, &state.db).await?;

    Ok(Json(serde_json::json!({
        "message": "User deleted successfully",
    })))
}

// PUT /api/users/{user_id}/status
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateUserStatusRequest {
    is_active: bool,
}

async fn update_user_status(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateUserStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let target = User::find_by_id(user_id, &state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if target.id == admin.id && !req.is_active {
        return Err(ApiError::BadRequest("Cannot deactivate your own account".to_string()));
    }

    let updated = User::set_active(target.id, req.is_active, &state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let message = if updated.is_active {
        "User activated successfully"
    } else {
        "User deactivated successfully"
    };

    Ok(Json(serde_json::json!({
        "message": message,
        "user": {
            "id": updated.id,
            "name": updated.name,
            "email": updated.email,
            "isActive": updated.is_active,
        },
    })))
}
