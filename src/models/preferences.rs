use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SERVINGS: u32 = 2;
pub const MIN_SERVINGS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DietaryFilter {
    #[default]
    None,
    Vegetarian,
    Vegan,
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
    Keto,
    #[serde(rename = "Low-Carb")]
    LowCarb,
    #[serde(rename = "High-Protein")]
    HighProtein,
    #[serde(rename = "Diabetic-Friendly")]
    DiabeticFriendly,
}

impl DietaryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryFilter::None => "None",
            DietaryFilter::Vegetarian => "Vegetarian",
            DietaryFilter::Vegan => "Vegan",
            DietaryFilter::GlutenFree => "Gluten-Free",
            DietaryFilter::Keto => "Keto",
            DietaryFilter::LowCarb => "Low-Carb",
            DietaryFilter::HighProtein => "High-Protein",
            DietaryFilter::DiabeticFriendly => "Diabetic-Friendly",
        }
    }
}

impl std::fmt::Display for DietaryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegionalStyle {
    #[default]
    Original,
    Indian,
    Mexican,
    Italian,
    Mediterranean,
    Chinese,
}

impl RegionalStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionalStyle::Original => "Original",
            RegionalStyle::Indian => "Indian",
            RegionalStyle::Mexican => "Mexican",
            RegionalStyle::Italian => "Italian",
            RegionalStyle::Mediterranean => "Mediterranean",
            RegionalStyle::Chinese => "Chinese",
        }
    }
}

impl std::fmt::Display for RegionalStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Goal {
    #[default]
    Standard,
    #[serde(rename = "Budget-Friendly")]
    Budget,
    #[serde(rename = "Healthier Version")]
    Healthy,
    Indulgent,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Standard => "Standard",
            Goal::Budget => "Budget-Friendly",
            Goal::Healthy => "Healthier Version",
            Goal::Indulgent => "Indulgent",
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conversion knobs chosen by the user. A value is copied into each
/// conversion call, so later edits never affect a request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    dietary: DietaryFilter,
    region: RegionalStyle,
    #[serde(deserialize_with = "deserialize_servings")]
    servings: u32,
    goal: Goal,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dietary: DietaryFilter::None,
            region: RegionalStyle::Original,
            servings: DEFAULT_SERVINGS,
            goal: Goal::Standard,
        }
    }
}

impl Preferences {
    pub fn new(dietary: DietaryFilter, region: RegionalStyle, servings: u32, goal: Goal) -> Self {
        Self {
            dietary,
            region,
            servings: servings.max(MIN_SERVINGS),
            goal,
        }
    }

    pub fn dietary(&self) -> DietaryFilter {
        self.dietary
    }

    pub fn region(&self) -> RegionalStyle {
        self.region
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn with_dietary(self, dietary: DietaryFilter) -> Self {
        Self { dietary, ..self }
    }

    pub fn with_region(self, region: RegionalStyle) -> Self {
        Self { region, ..self }
    }

    /// Values below one are raised to one; there is no upper bound.
    pub fn with_servings(self, servings: u32) -> Self {
        Self {
            servings: servings.max(MIN_SERVINGS),
            ..self
        }
    }

    pub fn with_goal(self, goal: Goal) -> Self {
        Self { goal, ..self }
    }
}

fn deserialize_servings<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let servings = u32::deserialize(deserializer)?;
    Ok(servings.max(MIN_SERVINGS))
}
