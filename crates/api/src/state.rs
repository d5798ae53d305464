use std::sync::Arc;

use coffeeshop_db::store::DrinkStore;

use crate::auth::TokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Drink persistence (PostgreSQL or in-memory).
    pub store: Arc<dyn DrinkStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer-token verifier used by the permission guard.
    pub verifier: Arc<TokenVerifier>,
}
