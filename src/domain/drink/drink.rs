use serde::Serialize;

use super::value_objects::{Ingredient, IngredientShort, RecipeInput};
use crate::domain::validation::{require_text, ValidationError};

/// Drink on the coffee-shop menu
///
/// The recipe is persisted as a JSON string; repositories decode it into
/// ingredients before handing the drink out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public menu projection: colors and proportions only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientShort>,
}

/// Barista projection: full ingredients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.iter().map(IngredientShort::from).collect(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }

    /// Applies a partial update in place
    ///
    /// Fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: DrinkPatch) -> Result<(), ValidationError> {
        if let Some(title) = patch.title {
            self.title = require_text("title", Some(title))?;
        }
        if let Some(recipe) = patch.recipe {
            self.recipe = recipe.into_ingredients()?;
        }
        Ok(())
    }
}

/// Validated payload for a new drink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkDraft {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl DrinkDraft {
    pub fn new(title: Option<String>, recipe: Option<RecipeInput>) -> Result<Self, ValidationError> {
        let title = require_text("title", title)?;
        let recipe = recipe
            .ok_or_else(|| ValidationError::missing("recipe"))?
            .into_ingredients()?;

        Ok(Self { title, recipe })
    }
}

/// Partial update for an existing drink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkPatch {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}
