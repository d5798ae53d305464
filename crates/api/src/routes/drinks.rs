//! Route definitions for the drinks catalog.

use axum::routing::{delete, get, patch, post};
use axum::Router;
use coffeeshop_core::permissions::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};

use crate::handlers::drinks;
use crate::middleware::auth::protected;
use crate::state::AppState;

/// Drink routes, mounted at the root.
///
/// ```text
/// GET    /drinks          -> list_drinks          (public)
/// POST   /drinks          -> create_drink         (post:drinks)
/// GET    /drinks-detail   -> list_drinks_detail   (get:drinks-detail)
/// PATCH  /drinks/{id}     -> update_drink         (patch:drinks)
/// DELETE /drinks/{id}     -> delete_drink         (delete:drinks)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/drinks",
            get(drinks::list_drinks).merge(protected(state, POST_DRINKS, post(drinks::create_drink))),
        )
        .route(
            "/drinks-detail",
            protected(state, GET_DRINKS_DETAIL, get(drinks::list_drinks_detail)),
        )
        .route(
            "/drinks/{id}",
            protected(state, PATCH_DRINKS, patch(drinks::update_drink))
                .merge(protected(state, DELETE_DRINKS, delete(drinks::delete_drink))),
        )
}
