pub mod input;
pub mod preferences;
pub mod recipe;

pub use input::ConversionInput;
pub use preferences::{DietaryFilter, Goal, Preferences, RegionalStyle};
pub use recipe::{Ingredient, IngredientCategory, InstructionStep, NutritionInfo, Recipe};
