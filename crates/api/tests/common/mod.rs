#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tower::ServiceExt;

use coffeeshop_api::auth::keys::{KeySetSource, StaticKeySet};
use coffeeshop_api::auth::{AuthConfig, TokenVerifier};
use coffeeshop_api::config::{ServerConfig, StorageBackend};
use coffeeshop_api::router::build_app_router;
use coffeeshop_api::state::AppState;
use coffeeshop_db::store::MemoryDrinkStore;

const PRIVATE_KEY: &str = include_str!("../fixtures/test_rsa_key.pem");
const JWKS: &str = include_str!("../fixtures/jwks.json");
pub const KID: &str = "test-key-1";
pub const DOMAIN: &str = "coffee.test";
pub const AUDIENCE: &str = "drinks";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8100".to_string()],
        request_timeout_secs: 30,
        run_migrations: false,
        storage_backend: StorageBackend::Memory,
        database_url: None,
        auth: AuthConfig::new(DOMAIN, AUDIENCE),
    }
}

/// Build the full application router backed by a fresh in-memory store and
/// the fixture key set.
pub fn build_test_app() -> Router {
    let keys: JwkSet = serde_json::from_str(JWKS).unwrap();
    build_test_app_with_keys(Arc::new(StaticKeySet(keys)))
}

/// Like [`build_test_app`], but verifying tokens against `keys`.
pub fn build_test_app_with_keys(keys: Arc<dyn KeySetSource>) -> Router {
    let config = test_config();
    let verifier = TokenVerifier::new(&config.auth, keys);

    let state = AppState {
        store: Arc::new(MemoryDrinkStore::new()),
        config: Arc::new(config),
        verifier: Arc::new(verifier),
    };
    build_app_router(state)
}

/// Sign a token with arbitrary claims using the fixture key.
pub fn sign_claims(claims: serde_json::Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KID.to_string());
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
    encode(&header, &claims, &key).unwrap()
}

/// A valid token granting `permissions`.
pub fn token_with(permissions: &[&str]) -> String {
    let now = chrono::Utc::now().timestamp();
    sign_claims(serde_json::json!({
        "sub": "auth0|tester",
        "aud": AUDIENCE,
        "iss": format!("https://{DOMAIN}/"),
        "iat": now,
        "exp": now + 3600,
        "permissions": permissions,
    }))
}

/// A manager token holding every drink permission.
pub fn manager_token() -> String {
    token_with(&[
        "get:drinks-detail",
        "post:drinks",
        "patch:drinks",
        "delete:drinks",
    ])
}

/// Send a request through the router.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The Water drink used across tests.
pub fn water() -> serde_json::Value {
    serde_json::json!({
        "title": "Water",
        "recipe": [{"color": "blue", "name": "water", "parts": 1}]
    })
}
