//! Authentication and authorization primitives.
//!
//! - [`error`] -- [`AuthError`], the structured failure rendered by the global handler.
//! - [`keys`] -- sources of the issuer's signing-key set.
//! - [`verifier`] -- bearer-token extraction and RS256 verification.

pub mod error;
pub mod keys;
pub mod verifier;

pub use error::AuthError;
pub use verifier::{extract_bearer_token, AuthConfig, Claims, TokenVerifier};
