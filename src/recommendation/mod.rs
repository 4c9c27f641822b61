pub mod catalog;
pub mod engine;
pub mod generative;

use serde::{Deserialize, Serialize};

use crate::nutrition::NutritionInfo;

pub use catalog::fallback_recommendations;
pub use engine::{ProviderPort, RecommendationEngine};
pub use generative::{GenerativeProvider, LlmMealProvider, MealRequestSpec, ProviderError};

/// Number of candidates every recommendation call returns.
pub const RECOMMENDATION_COUNT: usize = 3;

/// Which meal of the day a recommendation is for.
///
/// Parsing never fails: anything other than the three known slots is kept
/// verbatim in `Other` and served from the dinner catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealSlot {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Other(String),
}

impl MealSlot {
    pub fn as_str(&self) -> &str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Other(raw) => raw,
        }
    }
}

impl From<&str> for MealSlot {
    fn from(value: &str) -> Self {
        match value {
            "breakfast" => MealSlot::Breakfast,
            "lunch" => MealSlot::Lunch,
            "dinner" => MealSlot::Dinner,
            other => MealSlot::Other(other.to_string()),
        }
    }
}

impl From<String> for MealSlot {
    fn from(value: String) -> Self {
        MealSlot::from(value.as_str())
    }
}

impl From<MealSlot> for String {
    fn from(slot: MealSlot) -> Self {
        match slot {
            MealSlot::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("unknown difficulty '{}'", value)),
        }
    }
}

/// Provider-reported nutrition. Kept as floats since models rarely round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct EstimatedNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    /// Per-meal target snapshot. Identical across the candidates of one call.
    pub nutrition: NutritionInfo,
    pub prep_time: String,
    pub difficulty: Difficulty,
    /// The provider's own estimate for this dish, when it came from the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_nutrition: Option<EstimatedNutrition>,
}
