use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_AGE_YEARS: f64 = 30.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    WeightGain,
    #[default]
    Maintenance,
    /// Shares the maintenance calorie target and macro split.
    MuscleGain,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::WeightGain => "weight_gain",
            FitnessGoal::Maintenance => "maintenance",
            FitnessGoal::MuscleGain => "muscle_gain",
        }
    }
}

impl From<&str> for FitnessGoal {
    fn from(value: &str) -> Self {
        match value {
            "weight_loss" => FitnessGoal::WeightLoss,
            "weight_gain" => FitnessGoal::WeightGain,
            "muscle_gain" => FitnessGoal::MuscleGain,
            _ => FitnessGoal::Maintenance,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(value: &str) -> Self {
        match value {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        }
    }
}

/// A user's nutrition profile as held by the profile store.
///
/// Missing fields and unrecognised enum strings are replaced with their
/// defaults while deserializing, so every value that reaches the calculator
/// is already complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawUserProfile")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub fitness_goal: FitnessGoal,
    pub dietary_preferences: Vec<String>,
    pub allergies: Vec<String>,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(rename = "age")]
    pub age_years: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    /// Stored goal string when it did not match a known goal. The calculator
    /// treats such goals as maintenance; prompts still show the stored text.
    #[serde(skip)]
    pub unrecognized_fitness_goal: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_id: None,
            fitness_goal: FitnessGoal::default(),
            dietary_preferences: Vec::new(),
            allergies: Vec::new(),
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
            age_years: DEFAULT_AGE_YEARS,
            gender: Gender::default(),
            activity_level: ActivityLevel::default(),
            unrecognized_fitness_goal: None,
        }
    }
}

// Loosely-typed shape of the stored document. Everything is optional here;
// `From<RawUserProfile>` is the single place defaults get applied.
#[derive(Debug, Deserialize, Default)]
struct RawUserProfile {
    user_id: Option<String>,
    fitness_goal: Option<String>,
    dietary_preferences: Option<Vec<String>>,
    allergies: Option<Vec<String>>,
    #[serde(alias = "height_cm")]
    height: Option<f64>,
    #[serde(alias = "weight_kg")]
    weight: Option<f64>,
    #[serde(alias = "age_years")]
    age: Option<f64>,
    gender: Option<String>,
    activity_level: Option<String>,
}

impl From<RawUserProfile> for UserProfile {
    fn from(raw: RawUserProfile) -> Self {
        let fitness_goal = raw.fitness_goal.as_deref().map(FitnessGoal::from).unwrap_or_default();
        let unrecognized_fitness_goal =
            raw.fitness_goal.filter(|stored| stored.as_str() != fitness_goal.as_str());

        Self {
            user_id: raw.user_id,
            fitness_goal,
            dietary_preferences: raw.dietary_preferences.unwrap_or_default(),
            allergies: raw.allergies.unwrap_or_default(),
            height_cm: raw.height.unwrap_or(DEFAULT_HEIGHT_CM),
            weight_kg: raw.weight.unwrap_or(DEFAULT_WEIGHT_KG),
            age_years: raw.age.unwrap_or(DEFAULT_AGE_YEARS),
            gender: raw.gender.as_deref().map(Gender::from).unwrap_or_default(),
            activity_level: raw
                .activity_level
                .as_deref()
                .map(ActivityLevel::from)
                .unwrap_or_default(),
            unrecognized_fitness_goal,
        }
    }
}

impl UserProfile {
    /// Goal as it should be described to people and models: the stored text
    /// when it was not recognised, otherwise the canonical name.
    pub fn fitness_goal_label(&self) -> &str {
        self.unrecognized_fitness_goal.as_deref().unwrap_or(self.fitness_goal.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

impl UserProfile {
    /// Stricter contract for callers that want to reject nonsensical body
    /// measurements. The calculator itself never calls this and computes on
    /// whatever values it is given.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, value) in [
            ("height", self.height_cm),
            ("weight", self.weight_kg),
            ("age", self.age_years),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProfileError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}
