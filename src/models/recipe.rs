use serde::{Deserialize, Serialize};

/// A converted recipe exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<InstructionStep>,
    pub nutrition: NutritionInfo,
    #[serde(default)]
    pub estimated_cost: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>, // set when this replaced something
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution_reason: Option<String>,
    pub category: IngredientCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_cost: Option<String>,
}

impl Ingredient {
    pub fn is_substitution(&self) -> bool {
        self.original_name.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Produce,
    Dairy,
    Meat,
    Pantry,
    Spices,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 6] = [
        IngredientCategory::Produce,
        IngredientCategory::Dairy,
        IngredientCategory::Meat,
        IngredientCategory::Pantry,
        IngredientCategory::Spices,
        IngredientCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Produce => "produce",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Meat => "meat",
            IngredientCategory::Pantry => "pantry",
            IngredientCategory::Spices => "spices",
            IngredientCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionStep {
    pub step_number: u32,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub health_score: i32, // 0-100
    #[serde(default)]
    pub insights: Vec<String>,
}

/// One aisle of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingSection {
    pub category: IngredientCategory,
    pub items: Vec<Ingredient>,
}

impl Recipe {
    /// Ingredients grouped by category, in category order, empty groups skipped.
    /// Order within a group follows the recipe.
    pub fn shopping_list(&self) -> Vec<ShoppingSection> {
        IngredientCategory::ALL
            .iter()
            .filter_map(|category| {
                let items: Vec<Ingredient> = self
                    .ingredients
                    .iter()
                    .filter(|i| i.category == *category)
                    .cloned()
                    .collect();

                if items.is_empty() {
                    None
                } else {
                    Some(ShoppingSection {
                        category: *category,
                        items,
                    })
                }
            })
            .collect()
    }

    pub fn substitutions(&self) -> Vec<&Ingredient> {
        self.ingredients.iter().filter(|i| i.is_substitution()).collect()
    }
}
