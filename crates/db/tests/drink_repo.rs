//! Integration tests for the `drinks` table against a real database.
//!
//! Each test gets a fresh database from `DATABASE_URL` via `#[sqlx::test]`.

use assert_matches::assert_matches;
use coffeeshop_core::recipe::Ingredient;
use coffeeshop_db::models::drink::{DrinkChanges, NewDrink};
use coffeeshop_db::repositories::DrinkRepo;
use coffeeshop_db::store::{DrinkStore, PgDrinkStore, StoreError};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ingredient(name: &str, color: &str, parts: u32) -> Ingredient {
    Ingredient {
        color: color.to_string(),
        name: name.to_string(),
        parts,
    }
}

fn new_drink(title: &str) -> NewDrink {
    NewDrink {
        title: title.to_string(),
        recipe: vec![ingredient("water", "blue", 1)],
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find(pool: PgPool) {
    let created = DrinkRepo::create(&pool, &new_drink("Water")).await.unwrap();
    assert_eq!(created.title, "Water");

    let found = DrinkRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.recipe.0, vec![ingredient("water", "blue", 1)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_recipe_order_survives_round_trip(pool: PgPool) {
    let input = NewDrink {
        title: "Latte".to_string(),
        recipe: vec![
            ingredient("espresso", "brown", 1),
            ingredient("milk", "white", 3),
            ingredient("foam", "grey", 1),
        ],
    };
    let created = DrinkRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.recipe.0, input.recipe);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    DrinkRepo::create(&pool, &new_drink("B")).await.unwrap();
    DrinkRepo::create(&pool, &new_drink("A")).await.unwrap();

    let titles: Vec<_> = DrinkRepo::list_all(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(titles, ["B", "A"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_recipe_only(pool: PgPool) {
    let created = DrinkRepo::create(&pool, &new_drink("Water")).await.unwrap();

    let changes = DrinkChanges {
        title: None,
        recipe: Some(vec![ingredient("ice", "white", 2)]),
    };
    let updated = DrinkRepo::update(&pool, created.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Water");
    assert_eq!(updated.recipe.0, vec![ingredient("ice", "white", 2)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let changes = DrinkChanges {
        title: Some("Ghost".to_string()),
        recipe: None,
    };
    assert!(DrinkRepo::update(&pool, 999_999, &changes)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete(pool: PgPool) {
    let created = DrinkRepo::create(&pool, &new_drink("Water")).await.unwrap();
    assert!(DrinkRepo::delete(&pool, created.id).await.unwrap());
    assert!(!DrinkRepo::delete(&pool, created.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Store error classification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_title_is_classified(pool: PgPool) {
    let store = PgDrinkStore::new(pool);
    store.create(new_drink("Water")).await.unwrap();

    let err = store.create(new_drink("Water")).await.unwrap_err();
    assert_matches!(err, StoreError::DuplicateTitle(t) if t == "Water");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rename_onto_existing_title_is_classified(pool: PgPool) {
    let store = PgDrinkStore::new(pool);
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
