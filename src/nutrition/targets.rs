use serde::{Deserialize, Serialize};

/// Daily intake is always split evenly over this many meals, whatever slot
/// the caller asked about.
pub const MEALS_PER_DAY: i64 = 3;

/// Atwater factors, kcal per gram.
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const CARB_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// Calorie and macronutrient targets, either per day or per meal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MacroTargets {
    pub calories: i64,
    pub protein_grams: i64,
    pub carbs_grams: i64,
    pub fat_grams: i64,
}

impl MacroTargets {
    /// Splits daily targets into one meal's share. Each field is divided
    /// independently with integer truncation.
    pub fn per_meal(&self) -> MacroTargets {
        MacroTargets {
            calories: self.calories / MEALS_PER_DAY,
            protein_grams: self.protein_grams / MEALS_PER_DAY,
            carbs_grams: self.carbs_grams / MEALS_PER_DAY,
            fat_grams: self.fat_grams / MEALS_PER_DAY,
        }
    }

    /// Energy implied by the gram targets alone.
    pub fn macro_energy_kcal(&self) -> f64 {
        self.protein_grams as f64 * PROTEIN_KCAL_PER_GRAM
            + self.carbs_grams as f64 * CARB_KCAL_PER_GRAM
            + self.fat_grams as f64 * FAT_KCAL_PER_GRAM
    }
}

/// Nutrition block as it appears on a recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NutritionInfo {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

impl From<MacroTargets> for NutritionInfo {
    fn from(targets: MacroTargets) -> Self {
        Self {
            calories: targets.calories,
            protein: targets.protein_grams,
            carbs: targets.carbs_grams,
            fat: targets.fat_grams,
        }
    }
}
