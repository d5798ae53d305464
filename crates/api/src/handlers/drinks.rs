//! Handlers for the drinks catalog.
//!
//! `GET /drinks` is public and returns the short view. Everything else sits
//! behind the permission guard, which hands the verified [`Claims`] to the
//! handler through a request extension.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use coffeeshop_core::error::CoreError;
use coffeeshop_core::types::DbId;
use coffeeshop_db::models::drink::{CreateDrink, DrinkChanges, NewDrink, UpdateDrink};

use crate::auth::Claims;
use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::response::{DeleteResponse, DrinksResponse};
use crate::state::AppState;

fn subject(claims: &Claims) -> &str {
    claims.sub.as_deref().unwrap_or("-")
}

/// GET /drinks
///
/// Public listing with the short view (no ingredient names).
pub async fn list_drinks(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let drinks = state.store.list().await?;
    let drinks: Vec<_> = drinks.iter().map(|d| d.short()).collect();

    Ok(Json(DrinksResponse::new(drinks)))
}

/// GET /drinks-detail
///
/// Requires `get:drinks-detail`. Returns the long view.
pub async fn list_drinks_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<impl IntoResponse> {
    let drinks = state.store.list().await?;
    tracing::debug!(sub = subject(&claims), count = drinks.len(), "Listing drink details");
    let drinks: Vec<_> = drinks.iter().map(|d| d.long()).collect();

    Ok(Json(DrinksResponse::new(drinks)))
}

/// POST /drinks
///
/// Requires `post:drinks`. Creates a drink and returns it in the long view.
pub async fn create_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(input): JsonBody<CreateDrink>,
) -> AppResult<impl IntoResponse> {
    let input = NewDrink::try_from(input)?;
    let drink = state.store.create(input).await.map_err(AppError::write)?;

    tracing::info!(drink_id = drink.id, title = %drink.title, sub = subject(&claims), "Drink created");

    Ok(Json(DrinksResponse::new(vec![drink.long()])))
}

/// PATCH /drinks/{id}
///
/// Requires `patch:drinks`. Applies only the fields present in the body.
pub async fn update_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    PathParam(drink_id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateDrink>,
) -> AppResult<impl IntoResponse> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Drink",
            id: drink_id,
        })
    };

    if state.store.find(drink_id).await?.is_none() {
        return Err(not_found());
    }

    let changes = DrinkChanges::try_from(input)?;
    let drink = state
        .store
        .update(drink_id, changes)
        .await
        .map_err(AppError::write)?
        .ok_or_else(not_found)?;

    tracing::info!(drink_id, sub = subject(&claims), "Drink updated");

    Ok(Json(DrinksResponse::new(vec![drink.long()])))
}

/// DELETE /drinks/{id}
///
/// Requires `delete:drinks`.
pub async fn delete_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    PathParam(drink_id): PathParam<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.store.delete(drink_id).await.map_err(AppError::write)?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Drink",
            id: drink_id,
        }));
    }

    tracing::info!(drink_id, sub = subject(&claims), "Drink deleted");

    Ok(Json(DeleteResponse::new(drink_id)))
}
