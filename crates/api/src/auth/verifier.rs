//! Bearer-token verification against the identity provider's signing keys.
//!
//! Tokens are RS256-signed JWTs. For every verification the current key set
//! is fetched from the issuer, the token's `kid` is matched against it, and
//! the signature plus `exp`, `aud` and `iss` claims are validated.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::keys::KeySetSource;

/// Default timeout for the key-set request, in seconds.
const DEFAULT_JWKS_TIMEOUT_SECS: u64 = 5;

/// Decoded token claims.
///
/// `permissions` is typed because authorization depends on it; every other
/// claim is kept as raw JSON in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Identity provider settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Tenant domain, e.g. `coffee.eu.auth0.com`.
    pub domain: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Key-set endpoint.
    pub jwks_url: String,
    pub jwks_timeout_secs: u64,
}

impl AuthConfig {
    /// Build settings for `domain`, deriving the standard key-set URL.
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        let domain = domain.into();
        let jwks_url = format!("https://{domain}/.well-known/jwks.json");
        Self {
            domain,
            audience: audience.into(),
            jwks_url,
            jwks_timeout_secs: DEFAULT_JWKS_TIMEOUT_SECS,
        }
    }

    /// Load auth configuration from environment variables.
    ///
    /// | Env Var             | Required | Default                                |
    /// |---------------------|----------|----------------------------------------|
    /// | `AUTH0_DOMAIN`      | **yes**  | --                                     |
    /// | `API_AUDIENCE`      | **yes**  | --                                     |
    /// | `JWKS_URL`          | no       | `https://{domain}/.well-known/jwks.json` |
    /// | `JWKS_TIMEOUT_SECS` | no       | `5`                                    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty.
    pub fn from_env() -> Self {
        let domain = std::env::var("AUTH0_DOMAIN").expect("AUTH0_DOMAIN must be set");
        assert!(!domain.is_empty(), "AUTH0_DOMAIN must not be empty");

        let audience = std::env::var("API_AUDIENCE").expect("API_AUDIENCE must be set");
        assert!(!audience.is_empty(), "API_AUDIENCE must not be empty");

        let mut config = Self::new(domain, audience);

        if let Ok(url) = std::env::var("JWKS_URL") {
            config.jwks_url = url;
        }

        config.jwks_timeout_secs = std::env::var("JWKS_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_JWKS_TIMEOUT_SECS.to_string())
            .parse()
            .expect("JWKS_TIMEOUT_SECS must be a valid u64");

        config
    }

    /// Expected `iss` claim.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(AuthError::header_missing)?
        .to_str()
        .map_err(|_| AuthError::invalid_header("Authorization malformed."))?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::invalid_header("Authorization header must start with \"Bearer\"."),
        ),
        [] => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::invalid_header("Token not found.")),
        [_, token] => Ok(*token),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
        )),
    }
}

/// Verifies bearer tokens issued by the configured identity provider.
pub struct TokenVerifier {
    keys: Arc<dyn KeySetSource>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig, keys: Arc<dyn KeySetSource>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // An elapsed `exp` is rejected immediately.
        validation.leeway = 0;
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[config.issuer()]);
        Self { keys, validation }
    }

    /// Verify `token` and return its claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let key_set = self.keys.fetch().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch signing keys");
            AuthError::invalid_header("Unable to fetch signing keys.")
        })?;

        let header = decode_header(token)
            .map_err(|_| AuthError::invalid_header("Authorization malformed."))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::invalid_header("Authorization malformed."))?;

        let jwk = key_set
            .find(&kid)
            .ok_or_else(|| AuthError::invalid_header("Unable to find the appropriate key."))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|_| AuthError::invalid_header("Unable to find the appropriate key."))?;

        let data = decode::<Claims>(token, &key, &self.validation).map_err(classify_jwt_error)?;
        Ok(data.claims)
    }
}

fn classify_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::token_expired(),
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::incorrect_claims(),
        ErrorKind::MissingRequiredClaim(claim) if claim == "aud" || claim == "iss" => {
            AuthError::incorrect_claims()
        }
        _ => AuthError::invalid_header("Unable to parse authentication token."),
    }
}
