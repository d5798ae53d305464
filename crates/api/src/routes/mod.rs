pub mod drinks;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /drinks            GET (public), POST
/// /drinks-detail     GET
/// /drinks/{id}       PATCH, DELETE
/// ```
///
/// Protected routes need the state up front because the permission guard
/// is attached per route.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new().merge(drinks::router(state))
}
