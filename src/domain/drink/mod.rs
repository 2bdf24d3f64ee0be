// Drink domain module
// Drinks and the ingredient recipes they are mixed from

#![allow(clippy::module_inception)]

pub mod drink;
pub mod value_objects;

pub use drink::{Drink, DrinkDraft, DrinkLong, DrinkPatch, DrinkShort};
pub use value_objects::{Ingredient, IngredientShort, RecipeInput};
