//! Bearer-token issuance and verification. Tokens are stateless: every
//! request re-validates the signature and expiry, and there is no
//! server-side session store to revoke from.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::ApiError;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: account id (UUID string).
    pub sub: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed HS256 token for the account. Lifetime comes from the
/// config (168 hours = 7 days by default).
pub fn issue_token(user_id: Uuid, config: &JwtConfig) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + config.expires_in_hours * 3600,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("JWT encode")))
}

/// Verify signature and expiry against the shared secret. An expired token
/// is reported distinctly from a malformed or tampered one so the client
/// can tell "log in again" apart from "broken credential".
pub fn decode_token(token: &str, config: &JwtConfig) -> Result<Claims, ApiError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpired,
        _ => ApiError::InvalidToken,
    })
}

/// Strip the `Bearer ` scheme from an Authorization header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").map(str::trim)
}
