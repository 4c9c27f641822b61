use crate::nutrition::targets::{
    MacroTargets, CARB_KCAL_PER_GRAM, FAT_KCAL_PER_GRAM, PROTEIN_KCAL_PER_GRAM,
};
use crate::profile::{ActivityLevel, FitnessGoal, Gender, UserProfile};

/// Share of total calories given to each macronutrient. The three ratios sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Daily surplus or deficit applied on top of TDEE.
const GOAL_CALORIE_DELTA: f64 = 500.0;

const WEIGHT_LOSS_RATIOS: MacroRatios = MacroRatios { protein: 0.40, carbs: 0.30, fat: 0.30 };
const WEIGHT_GAIN_RATIOS: MacroRatios = MacroRatios { protein: 0.30, carbs: 0.45, fat: 0.25 };
const MAINTENANCE_RATIOS: MacroRatios = MacroRatios { protein: 0.30, carbs: 0.40, fat: 0.30 };

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl Gender {
    /// Constant term of the Mifflin-St Jeor equation. `Other` uses -78, a
    /// midpoint between the male and female offsets kept for compatibility
    /// with existing profiles. It has no physiological basis of its own.
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
            Gender::Other => -78.0,
        }
    }
}

impl FitnessGoal {
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            FitnessGoal::WeightLoss => -GOAL_CALORIE_DELTA,
            FitnessGoal::WeightGain => GOAL_CALORIE_DELTA,
            FitnessGoal::Maintenance | FitnessGoal::MuscleGain => 0.0,
        }
    }

    pub fn macro_ratios(&self) -> MacroRatios {
        match self {
            FitnessGoal::WeightLoss => WEIGHT_LOSS_RATIOS,
            FitnessGoal::WeightGain => WEIGHT_GAIN_RATIOS,
            FitnessGoal::Maintenance | FitnessGoal::MuscleGain => MAINTENANCE_RATIOS,
        }
    }
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age_years
        + profile.gender.bmr_offset()
}

pub fn total_daily_energy_expenditure(profile: &UserProfile) -> f64 {
    basal_metabolic_rate(profile) * profile.activity_level.multiplier()
}

/// Goal-adjusted daily calories, truncated toward zero.
pub fn daily_calories(profile: &UserProfile) -> i64 {
    (total_daily_energy_expenditure(profile) + profile.fitness_goal.calorie_adjustment()) as i64
}

/// Computes daily calorie and macronutrient targets for a profile.
///
/// Total over every input: missing profile fields were already defaulted when
/// the profile was built, and nothing here is validated or clamped. A tiny
/// profile on a weight-loss goal can therefore produce a negative target.
pub fn compute_macro_targets(profile: &UserProfile) -> MacroTargets {
    let calories = daily_calories(profile);
    let ratios = profile.fitness_goal.macro_ratios();
    // Floor rather than truncate so the grams never imply more energy than
    // `calories`, including when the target is negative.
    let grams = |ratio: f64, kcal_per_gram: f64| {
        (calories as f64 * ratio / kcal_per_gram).floor() as i64
    };

    MacroTargets {
        calories,
        protein_grams: grams(ratios.protein, PROTEIN_KCAL_PER_GRAM),
        carbs_grams: grams(ratios.carbs, CARB_KCAL_PER_GRAM),
        fat_grams: grams(ratios.fat, FAT_KCAL_PER_GRAM),
    }
}
