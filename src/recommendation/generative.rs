use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::api_connection::endpoints::{ChatCompletionRequest, ChatMessage};
use crate::api_connection::{ApiConnectionError, ChatClient};
use crate::nutrition::{MacroTargets, NutritionInfo};
use crate::profile::{ActivityLevel, FitnessGoal, UserProfile};
use crate::recommendation::{
    Difficulty, EstimatedNutrition, MealSlot, Recommendation, RECOMMENDATION_COUNT,
};

pub const SYSTEM_PROMPT: &str = "You are a professional nutritionist and meal planner.";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// No provider is configured. This is a normal state, not a failure.
    #[error("generative provider is not configured")]
    Unavailable,
    #[error("generative provider request failed: {0}")]
    Transport(String),
    #[error("generative provider returned malformed content: {0}")]
    Malformed(String),
}

impl From<ApiConnectionError> for ProviderError {
    fn from(err: ApiConnectionError) -> Self {
        match err {
            ApiConnectionError::MissingApiKey(_) => ProviderError::Unavailable,
            ApiConnectionError::SerializationError(e) => ProviderError::Malformed(e.to_string()),
            empty @ ApiConnectionError::EmptyResponse => {
                ProviderError::Malformed(empty.to_string())
            }
            other @ (ApiConnectionError::NetworkError(_) | ApiConnectionError::ApiError { .. }) => {
                ProviderError::Transport(other.to_string())
            }
        }
    }
}

/// Everything a provider is told about the request.
#[derive(Debug, Clone, PartialEq)]
pub struct MealRequestSpec {
    pub fitness_goal: FitnessGoal,
    /// Goal text shown to the model; keeps a stored goal the calculator did
    /// not recognise instead of its maintenance fallback.
    pub fitness_goal_label: String,
    pub dietary_preferences: Vec<String>,
    pub allergies: Vec<String>,
    pub activity_level: ActivityLevel,
    pub meal_slot: MealSlot,
    pub per_meal: MacroTargets,
}

impl MealRequestSpec {
    pub fn new(profile: &UserProfile, meal_slot: &MealSlot, per_meal: MacroTargets) -> Self {
        Self {
            fitness_goal: profile.fitness_goal,
            fitness_goal_label: profile.fitness_goal_label().to_string(),
            dietary_preferences: profile.dietary_preferences.clone(),
            allergies: profile.allergies.clone(),
            activity_level: profile.activity_level,
            meal_slot: meal_slot.clone(),
            per_meal,
        }
    }

    pub fn prompt(&self) -> String {
        let join_or_none = |tags: &[String]| {
            if tags.is_empty() {
                "None".to_string()
            } else {
                tags.join(", ")
            }
        };

        format!(
            "Generate {count} nutritious {slot} meal recommendations for someone with the following profile:

Fitness Goal: {goal}
Dietary Preferences: {preferences}
Allergies: {allergies}
Activity Level: {activity}

Target Macros per meal:
- Calories: {calories} cal
- Protein: {protein}g
- Carbs: {carbs}g
- Fat: {fat}g

For each meal, provide:
1. Meal name
2. Description
3. Ingredients list
4. Estimated nutritional info (calories, protein, carbs, fat)
5. Preparation time
6. Difficulty level

Format as JSON array. Respond with the JSON array only, no explanatory text and no Markdown.
The array must contain exactly {count} objects, each with these keys:
- \"name\": string
- \"description\": string
- \"ingredients\": array of strings
- \"nutrition\": object with numeric \"calories\", \"protein\", \"carbs\" and \"fat\"
- \"prep_time\": string, e.g. \"15 minutes\"
- \"difficulty\": one of \"easy\", \"medium\", \"hard\"",
            count = RECOMMENDATION_COUNT,
            slot = self.meal_slot,
            goal = self.fitness_goal_label,
            preferences = join_or_none(&self.dietary_preferences),
            allergies = join_or_none(&self.allergies),
            activity = self.activity_level.as_str(),
            calories = self.per_meal.calories,
            protein = self.per_meal.protein_grams,
            carbs = self.per_meal.carbs_grams,
            fat = self.per_meal.fat_grams,
        )
    }
}

/// External service that writes meal suggestions.
///
/// Implementations make one attempt per call. Anything they return other
/// than exactly three well-formed candidates is an error.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(
        &self,
        spec: &MealRequestSpec,
    ) -> Result<[Recommendation; RECOMMENDATION_COUNT], ProviderError>;
}

/// Shape one candidate must have in the provider's JSON.
#[derive(Debug, Deserialize)]
struct MealCandidate {
    name: String,
    description: String,
    ingredients: Vec<String>,
    nutrition: EstimatedNutrition,
    prep_time: String,
    difficulty: Difficulty,
}

impl MealCandidate {
    fn into_recommendation(self, per_meal: MacroTargets) -> Recommendation {
        Recommendation {
            name: self.name,
            description: self.description,
            ingredients: self.ingredients,
            nutrition: NutritionInfo::from(per_meal),
            prep_time: self.prep_time,
            difficulty: self.difficulty,
            estimated_nutrition: Some(self.nutrition),
        }
    }
}

/// Models like to wrap JSON in ```json fences even when told not to.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if !(trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() >= 6) {
        return trimmed;
    }
    let inner = &trimmed[3..trimmed.len() - 3];
    inner.strip_prefix("json").unwrap_or(inner).trim()
}

/// Parses provider output into exactly three recommendations, each carrying
/// `per_meal` as its nutrition snapshot.
pub fn parse_candidates(
    content: &str,
    per_meal: MacroTargets,
) -> Result<[Recommendation; RECOMMENDATION_COUNT], ProviderError> {
    let json = strip_code_fences(content);
    if json.is_empty() {
        return Err(ProviderError::Malformed("empty content".to_string()));
    }

    let candidates: Vec<MealCandidate> =
        serde_json::from_str(json).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let count = candidates.len();
    let candidates: [MealCandidate; RECOMMENDATION_COUNT] = candidates.try_into().map_err(|_| {
        ProviderError::Malformed(format!(
            "expected {} recommendations, got {}",
            RECOMMENDATION_COUNT, count
        ))
    })?;

    Ok(candidates.map(|candidate| candidate.into_recommendation(per_meal)))
}

/// `GenerativeProvider` backed by an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct LlmMealProvider {
    client: ChatClient,
}

impl LlmMealProvider {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    pub fn build_request(&self, spec: &MealRequestSpec) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.client.model().to_string(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(spec.prompt())],
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
        }
    }
}

#[async_trait]
impl GenerativeProvider for LlmMealProvider {
    fn name(&self) -> &str {
        self.client.model()
    }

    async fn generate(
        &self,
        spec: &MealRequestSpec,
    ) -> Result<[Recommendation; RECOMMENDATION_COUNT], ProviderError> {
        let request = self.build_request(spec);
        let response = self.client.call_chat_completion(&request).await?;

        let content = response.first_content().ok_or(ApiConnectionError::EmptyResponse)?;
        debug!(model = %response.model, "raw provider content:\n{}", content);

        parse_candidates(content, spec.per_meal)
    }
}
