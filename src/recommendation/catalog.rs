use crate::nutrition::{MacroTargets, NutritionInfo};
use crate::recommendation::{Difficulty, MealSlot, Recommendation, RECOMMENDATION_COUNT};

/// Static reference entry. Allergies and dietary preferences are not
/// considered here; only the generative path sees them.
struct CatalogEntry {
    name: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
    prep_time: &'static str,
    difficulty: Difficulty,
}

const BREAKFAST: [CatalogEntry; RECOMMENDATION_COUNT] = [
    CatalogEntry {
        name: "High-Protein Oatmeal Bowl",
        description: "Creamy oatmeal topped with nuts, seeds, and berries",
        ingredients: &["Oats", "Protein powder", "Almonds", "Blueberries", "Chia seeds"],
        prep_time: "10 minutes",
        difficulty: Difficulty::Easy,
    },
    CatalogEntry {
        name: "Veggie Egg White Scramble",
        description: "Light and nutritious egg whites with colorful vegetables",
        ingredients: &["Egg whites", "Spinach", "Tomatoes", "Bell peppers", "Whole grain toast"],
        prep_time: "15 minutes",
        difficulty: Difficulty::Easy,
    },
    CatalogEntry {
        name: "Greek Yogurt Parfait",
        description: "Layered Greek yogurt with granola and fresh fruit",
        ingredients: &["Greek yogurt", "Granola", "Mixed berries", "Honey", "Walnuts"],
        prep_time: "5 minutes",
        difficulty: Difficulty::Easy,
    },
];

const LUNCH: [CatalogEntry; RECOMMENDATION_COUNT] = [
    CatalogEntry {
        name: "Grilled Chicken Salad",
        description: "Fresh mixed greens with grilled chicken breast",
        ingredients: &[
            "Chicken breast",
            "Mixed greens",
            "Cherry tomatoes",
            "Cucumber",
            "Olive oil",
        ],
        prep_time: "20 minutes",
        difficulty: Difficulty::Medium,
    },
    CatalogEntry {
        name: "Quinoa Buddha Bowl",
        description: "Colorful bowl with quinoa, roasted vegetables, and tahini",
        ingredients: &["Quinoa", "Chickpeas", "Sweet potato", "Kale", "Tahini"],
        prep_time: "30 minutes",
        difficulty: Difficulty::Medium,
    },
    CatalogEntry {
        name: "Turkey and Avocado Wrap",
        description: "Lean turkey breast with fresh avocado in whole wheat wrap",
        ingredients: &["Turkey breast", "Avocado", "Whole wheat wrap", "Lettuce", "Tomato"],
        prep_time: "10 minutes",
        difficulty: Difficulty::Easy,
    },
];

const DINNER: [CatalogEntry; RECOMMENDATION_COUNT] = [
    CatalogEntry {
        name: "Baked Salmon with Vegetables",
        description: "Omega-3 rich salmon with roasted seasonal vegetables",
        ingredients: &["Salmon fillet", "Broccoli", "Carrots", "Lemon", "Herbs"],
        prep_time: "25 minutes",
        difficulty: Difficulty::Medium,
    },
    CatalogEntry {
        name: "Lean Beef Stir-Fry",
        description: "Tender beef strips with colorful vegetables",
        ingredients: &["Lean beef", "Bell peppers", "Snap peas", "Brown rice", "Soy sauce"],
        prep_time: "20 minutes",
        difficulty: Difficulty::Medium,
    },
    CatalogEntry {
        name: "Vegetarian Lentil Curry",
        description: "Hearty lentil curry with aromatic spices",
        ingredients: &["Red lentils", "Coconut milk", "Spinach", "Tomatoes", "Curry spices"],
        prep_time: "35 minutes",
        difficulty: Difficulty::Medium,
    },
];

fn entries_for(slot: &MealSlot) -> &'static [CatalogEntry; RECOMMENDATION_COUNT] {
    match slot {
        MealSlot::Breakfast => &BREAKFAST,
        MealSlot::Lunch => &LUNCH,
        MealSlot::Dinner | MealSlot::Other(_) => &DINNER,
    }
}

impl CatalogEntry {
    fn to_recommendation(&self, per_meal: MacroTargets) -> Recommendation {
        Recommendation {
            name: self.name.to_string(),
            description: self.description.to_string(),
            ingredients: self.ingredients.iter().map(|i| i.to_string()).collect(),
            nutrition: NutritionInfo::from(per_meal),
            prep_time: self.prep_time.to_string(),
            difficulty: self.difficulty,
            estimated_nutrition: None,
        }
    }
}

/// Deterministic recommendations for a slot, each annotated with the same
/// per-meal targets. Unknown slots get the dinner list.
pub fn fallback_recommendations(
    slot: &MealSlot,
    per_meal: MacroTargets,
) -> [Recommendation; RECOMMENDATION_COUNT] {
    entries_for(slot).each_ref().map(|entry| entry.to_recommendation(per_meal))
}
