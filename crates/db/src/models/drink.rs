//! Drink model, request DTOs and the two serialization views.

use coffeeshop_core::error::CoreError;
use coffeeshop_core::recipe::{short_recipe, validate_recipe, Ingredient, RecipeInput, ShortIngredient};
use coffeeshop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `drinks` table.
#[derive(Debug, Clone, FromRow)]
pub struct Drink {
    pub id: DbId,
    pub title: String,
    pub recipe: Json<Vec<Ingredient>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Drink {
    /// Public projection: ingredient names are omitted.
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: short_recipe(&self.recipe),
        }
    }

    /// Detailed projection with the full recipe.
    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.0.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkShort {
    pub id: DbId,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkLong {
    pub id: DbId,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Body of `POST /drinks`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDrink {
    #[validate(length(min = 1))]
    pub title: String,
    pub recipe: RecipeInput,
}

/// Body of `PATCH /drinks/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDrink {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

/// A validated drink ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

impl DrinkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}

impl TryFrom<CreateDrink> for NewDrink {
    type Error = CoreError;

    fn try_from(input: CreateDrink) -> Result<Self, Self::Error> {
        input.validate()?;
        let recipe = input.recipe.into_recipe();
        validate_recipe(&recipe)?;
        Ok(NewDrink {
            title: input.title,
            recipe,
        })
    }
}

impl TryFrom<UpdateDrink> for DrinkChanges {
    type Error = CoreError;

    fn try_from(input: UpdateDrink) -> Result<Self, Self::Error> {
        input.validate()?;
        let recipe = input.recipe.map(RecipeInput::into_recipe);
        if let Some(recipe) = &recipe {
            validate_recipe(recipe)?;
        }
        Ok(DrinkChanges {
            title: input.title,
            recipe,
        })
    }
}
