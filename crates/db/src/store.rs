//! Storage backends behind the [`DrinkStore`] trait.
//!
//! - [`PgDrinkStore`] -- PostgreSQL via [`DrinkRepo`].
//! - [`MemoryDrinkStore`] -- in-process map, for tests and local demos.
//!
//! Both enforce the unique-title invariant and report it as
//! [`StoreError::DuplicateTitle`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use coffeeshop_core::types::DbId;
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::models::drink::{Drink, DrinkChanges, NewDrink};
use crate::repositories::DrinkRepo;
use crate::DbPool;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Constraint guarding drink title uniqueness.
const TITLE_CONSTRAINT: &str = "uq_drinks_title";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("A drink titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations on drinks.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks ordered by ID.
    async fn list(&self) -> Result<Vec<Drink>, StoreError>;

    async fn find(&self, id: DbId) -> Result<Option<Drink>, StoreError>;

    async fn create(&self, input: NewDrink) -> Result<Drink, StoreError>;

    /// Apply `changes` to the drink with `id`. `Ok(None)` if it does not exist.
    async fn update(&self, id: DbId, changes: DrinkChanges) -> Result<Option<Drink>, StoreError>;

    /// Remove the drink with `id`. `Ok(false)` if it does not exist.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

pub struct PgDrinkStore {
    pool: DbPool,
}

impl PgDrinkStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-title violation to [`StoreError::DuplicateTitle`].
fn classify_write_error(err: sqlx::Error, title: Option<&str>) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(TITLE_CONSTRAINT)
        {
            tracing::debug!(constraint = TITLE_CONSTRAINT, "Unique title violation");
            return StoreError::DuplicateTitle(title.unwrap_or_default().to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        Ok(DrinkRepo::list_all(&self.pool).await?)
    }

    async fn find(&self, id: DbId) -> Result<Option<Drink>, StoreError> {
        Ok(DrinkRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, input: NewDrink) -> Result<Drink, StoreError> {
        DrinkRepo::create(&self.pool, &input)
            .await
            .map_err(|e| classify_write_error(e, Some(&input.title)))
    }

    async fn update(&self, id: DbId, changes: DrinkChanges) -> Result<Option<Drink>, StoreError> {
        if changes.is_empty() {
            return self.find(id).await;
        }
        DrinkRepo::update(&self.pool, id, &changes)
            .await
            .map_err(|e| classify_write_error(e, changes.title.as_deref()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(DrinkRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryState {
    next_id: DbId,
    rows: BTreeMap<DbId, Drink>,
}

impl MemoryState {
    fn title_taken(&self, title: &str, except: Option<DbId>) -> bool {
        self.rows
            .values()
            .any(|d| d.title == title && Some(d.id) != except)
    }
}

/// Drink store kept entirely in process memory. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryDrinkStore {
    state: RwLock<MemoryState>,
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: DbId) -> Result<Option<Drink>, StoreError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: NewDrink) -> Result<Drink, StoreError> {
        let mut state = self.state.write().await;
        if state.title_taken(&input.title, None) {
            return Err(StoreError::DuplicateTitle(input.title));
        }

        state.next_id += 1;
        let now = Utc::now();
        let drink = Drink {
            id: state.next_id,
            title: input.title,
            recipe: Json(input.recipe),
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(drink.id, drink.clone());
        Ok(drink)
    }

    async fn update(&self, id: DbId, changes: DrinkChanges) -> Result<Option<Drink>, StoreError> {
        let mut state = self.state.write().await;
        if let Some(title) = &changes.title {
            if state.title_taken(title, Some(id)) && state.rows.contains_key(&id) {
                return Err(StoreError::DuplicateTitle(title.clone()));
            }
        }

        let Some(drink) = state.rows.get_mut(&id) else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(drink.clone()));
        }
        if let Some(title) = changes.title {
            drink.title = title;
        }
        if let Some(recipe) = changes.recipe {
            drink.recipe = Json(recipe);
        }
        drink.updated_at = Utc::now();
        Ok(Some(drink.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.state.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use coffeeshop_core::recipe::Ingredient;

    use super::*;

    fn new_drink(title: &str) -> NewDrink {
        NewDrink {
            title: title.to_string(),
            recipe: vec![Ingredient {
                color: "blue".to_string(),
                name: "water".to_string(),
                parts: 1,
            }],
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryDrinkStore::new();
        let a = store.create(new_drink("Water")).await.unwrap();
        let b = store.create(new_drink("Tea")).await.unwrap();
        assert!(b.id > a.id);

        let titles: Vec<_> = store.list().await.unwrap().into_iter().map(|d| d.title).collect();
        assert_eq!(titles, ["Water", "Tea"]);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_title() {
        let store = MemoryDrinkStore::new();
        store.create(new_drink("Water")).await.unwrap();
        let err = store.create(new_drink("Water")).await.unwrap_err();
        assert_matches!(err, StoreError::DuplicateTitle(t) if t == "Water");
    }

    #[tokio::test]
    async fn update_title_keeps_recipe() {
        let store = MemoryDrinkStore::new();
        let drink = store.create(new_drink("Water")).await.unwrap();

        let changes = DrinkChanges {
            title: Some("Sparkling Water".to_string()),
            recipe: None,
        };
        let updated = store.update(drink.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.title, "Sparkling Water");
        assert_eq!(updated.recipe.0, drink.recipe.0);
    }

    #[tokio::test]
    async fn update_to_own_title_is_allowed() {
        let store = MemoryDrinkStore::new();
        let drink = store.create(new_drink("Water")).await.unwrap();

        let changes = DrinkChanges {
            title: Some("Water".to_string()),
            recipe: None,
        };
        assert!(store.update(drink.id, changes).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_to_taken_title_fails() {
        let store = MemoryDrinkStore::new();
        store.create(new_drink("Water")).await.unwrap();
        let tea = store.create(new_drink("Tea")).await.unwrap();

        let changes = DrinkChanges {
            title: Some("Water".to_string()),
            recipe: None,
        };
        assert_matches!(
            store.update(tea.id, changes).await,
            Err(StoreError::DuplicateTitle(_))
        );
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let store = MemoryDrinkStore::new();
        let changes = DrinkChanges {
            title: Some("Ghost".to_string()),
            recipe: None,
        };
        assert!(store.update(42, changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = MemoryDrinkStore::new();
        let drink = store.create(new_drink("Water")).await.unwrap();

        assert!(store.delete(drink.id).await.unwrap());
        assert!(!store.delete(drink.id).await.unwrap());
        assert!(store.find(drink.id).await.unwrap().is_none());
    }
}
