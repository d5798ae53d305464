//! Structured authorization failure.
//!
//! Every failure carries a machine-readable `code`, a human-readable
//! `description` and the HTTP status it must be reported with. The global
//! error handler renders these unchanged.

use axum::http::StatusCode;

pub const CODE_HEADER_MISSING: &str = "authorization_header_missing";
pub const CODE_INVALID_HEADER: &str = "invalid_header";
pub const CODE_TOKEN_EXPIRED: &str = "token_expired";
pub const CODE_INVALID_CLAIMS: &str = "invalid_claims";
pub const CODE_UNAUTHORIZED: &str = "unauthorized";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub code: &'static str,
    pub description: String,
    pub status: StatusCode,
}

impl AuthError {
    pub fn new(code: &'static str, description: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code,
            description: description.into(),
            status,
        }
    }

    pub fn header_missing() -> Self {
        Self::new(
            CODE_HEADER_MISSING,
            "Authorization header is expected.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// A 401 `invalid_header` failure with the given description.
    pub fn invalid_header(description: impl Into<String>) -> Self {
        Self::new(CODE_INVALID_HEADER, description, StatusCode::UNAUTHORIZED)
    }

    pub fn token_expired() -> Self {
        Self::new(CODE_TOKEN_EXPIRED, "Token expired.", StatusCode::UNAUTHORIZED)
    }

    /// Audience or issuer mismatch.
    pub fn incorrect_claims() -> Self {
        Self::new(
            CODE_INVALID_CLAIMS,
            "Incorrect claims. Please, check the audience and issuer.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// The token verified but has no `permissions` claim.
    pub fn permissions_missing() -> Self {
        Self::new(
            CODE_INVALID_CLAIMS,
            "Permissions not included in JWT.",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn permission_not_found() -> Self {
        Self::new(
            CODE_UNAUTHORIZED,
            "Permission not found.",
            StatusCode::FORBIDDEN,
        )
    }
}
