use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth;
use crate::error::ApiError;
use crate::models::user::{Role, User};

/// The account behind the request's bearer token. Extraction decodes the
/// token and re-reads the account, so a deleted or deactivated account is
/// rejected even while its token is still within its lifetime.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let token = auth::bearer_token(auth_header).ok_or(ApiError::MissingToken)?;
        let claims = auth::decode_token(token, &state.config.jwt)?;

        let user_id: Uuid = claims.sub.parse().map_err(|_| ApiError::InvalidToken)?;

        let user = User::find_by_id(user_id, &state.db)
            .await?
            .ok_or(ApiError::UnknownAccount)?;

        if !user.is_active {
            return Err(ApiError::AccountDeactivated);
        }

        Ok(AuthUser(user))
    }
}

/// An authenticated account that also holds the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<Arc<crate::AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            return Err(ApiError::AdminRequired);
        }

        Ok(AdminUser(user))
    }
}

/// Admins may act on any account; everyone else only on their own.
pub fn ensure_admin_or_owner(user: &User, resource_owner: Uuid) -> Result<(), ApiError> {
    if user.role == Role::Admin || user.id == resource_owner {
        Ok(())
    } else {
        Err(ApiError::InsufficientPrivileges)
    }
}

/// `Json<T>` that reports malformed bodies as 400 instead of axum's default
/// 422, then runs the payload's validation rules before the handler sees it.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
