use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dates::DateError;

/// Every failure a handler can surface, mapped onto the HTTP taxonomy:
/// validation/domain 400, authentication 401, authorization 403, missing
/// entity 404, everything unexpected 500 with a generic body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Room is not available for the selected dates")]
    BookingConflict,

    #[error("No token provided. Access denied.")]
    MissingToken,

    #[error("Invalid token. Access denied.")]
    InvalidToken,

    #[error("Token expired. Please login again.")]
    TokenExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found. Access denied.")]
    UnknownAccount,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Account is deactivated. Please contact administrator.")]
    AccountDeactivated,

    #[error("Access denied. Admin privileges required.")]
    AdminRequired,

    #[error("Access denied. Insufficient privileges.")]
    InsufficientPrivileges,

    #[error("Access denied")]
    AccessDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Something went wrong!")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::BookingConflict => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MissingToken
            | ApiError::InvalidToken
            | ApiError::TokenExpired
            | ApiError::InvalidCredentials
            | ApiError::UnknownAccount
            | ApiError::WrongPassword => StatusCode::UNAUTHORIZED,
            ApiError::AccountDeactivated
            | ApiError::AdminRequired
            | ApiError::InsufficientPrivileges
            | ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // The client only ever sees the generic message; the chain goes to
        // the server log.
        if let ApiError::Internal(source) = &self {
            tracing::error!("internal error: {source:#}");
        }

        let body = match &self {
            ApiError::Validation(errors) => json!({
                "message": self.to_string(),
                "errors": errors,
            }),
            _ => json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("database error"))
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::Internal(anyhow::Error::new(err).context("password hashing error"))
    }
}

impl From<DateError> for ApiError {
    fn from(err: DateError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
