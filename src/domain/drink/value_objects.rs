use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

/// One line of a drink recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// Public projection of an ingredient (no name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientShort {
    pub color: String,
    pub parts: i64,
}

impl From<&Ingredient> for IngredientShort {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            color: ingredient.color.clone(),
            parts: ingredient.parts,
        }
    }
}

/// Recipe as clients send it: a single ingredient object or a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    /// Normalizes into a non-empty ingredient list
    ///
    /// # Validation Rules
    /// - At least one ingredient
    /// - Every ingredient has a non-blank name
    pub fn into_ingredients(self) -> Result<Vec<Ingredient>, ValidationError> {
        let ingredients = match self {
            RecipeInput::Many(list) => list,
            RecipeInput::One(single) => vec![single],
        };

        if ingredients.is_empty() {
            return Err(ValidationError::invalid("recipe", "needs at least one ingredient"));
        }
        if ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err(ValidationError::invalid("recipe", "ingredient name cannot be blank"));
        }

        Ok(ingredients)
    }
}
