pub mod calculator;
pub mod targets;

pub use calculator::compute_macro_targets;
pub use targets::{MacroTargets, NutritionInfo, MEALS_PER_DAY};
