//! Recipe value types and their short projection.
//!
//! A recipe is an ordered list of [`Ingredient`]s. The public drink listing
//! only exposes each ingredient's `color` and `parts` (enough to draw the
//! drink), so [`ShortIngredient`] is the projection used there.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// A single recipe entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Ingredient {
    pub color: String,
    pub name: String,
    /// Relative quantity of this ingredient. Must be at least 1.
    #[validate(range(min = 1))]
    pub parts: u32,
}

/// An ingredient without its name, as shown in the public drink listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

impl From<&Ingredient> for ShortIngredient {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            color: ingredient.color.clone(),
            parts: ingredient.parts,
        }
    }
}

/// Recipe as accepted in request bodies.
///
/// Clients usually send a list, but a lone ingredient object is accepted and
/// treated as a one-element recipe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    /// Normalize into the stored list form.
    pub fn into_recipe(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::Many(items) => items,
            RecipeInput::One(item) => vec![item],
        }
    }
}

/// Project a full recipe into its short form (names dropped, order kept).
pub fn short_recipe(recipe: &[Ingredient]) -> Vec<ShortIngredient> {
    recipe.iter().map(ShortIngredient::from).collect()
}

/// Check every ingredient of a recipe.
///
/// The error message names the offending position so clients can point at it.
pub fn validate_recipe(recipe: &[Ingredient]) -> Result<(), CoreError> {
    for (index, ingredient) in recipe.iter().enumerate() {
        ingredient
            .validate()
            .map_err(|e| CoreError::Validation(format!("recipe[{index}]: {e}")))?;
    }
    Ok(())
}
