use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::profile::UserProfile;
use crate::recommendation::{MealSlot, Recommendation, RecommendationEngine};

/// Source of stored user profiles. Authentication has already happened by
/// the time a profile is requested.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn load_profile(&self, user_id: &str) -> anyhow::Result<Option<UserProfile>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfiles {
    profiles: HashMap<String, UserProfile>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: impl Into<String>, profile: UserProfile) {
        self.profiles.insert(user_id.into(), profile);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn load_profile(&self, user_id: &str) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MealRecommendationRequest {
    #[serde(default)]
    pub meal_type: Option<String>,
}

impl MealRecommendationRequest {
    /// Requested slot; lunch when the caller did not say.
    pub fn meal_slot(&self) -> MealSlot {
        self.meal_type.as_deref().map(MealSlot::from).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRecommendationResponse {
    pub meal_type: MealSlot,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("User profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Profile lookup failed: {0}")]
    Repository(anyhow::Error),
}

/// Request handler for meal recommendations, built per deployment with its
/// collaborators passed in.
#[derive(Clone)]
pub struct MealRecommendationHandler {
    profiles: Arc<dyn ProfileRepository>,
    engine: RecommendationEngine,
}

impl MealRecommendationHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, engine: RecommendationEngine) -> Self {
        Self { profiles, engine }
    }

    /// Handles a recommendation request for an already-authenticated user.
    ///
    /// `body` is the raw JSON request body; an empty body is treated as `{}`.
    #[instrument(skip(self, body))]
    pub async fn handle(
        &self,
        user_id: &str,
        body: &str,
    ) -> Result<MealRecommendationResponse, HandlerError> {
        // A missing profile is reported before the body is looked at.
        let profile = self
            .profiles
            .load_profile(user_id)
            .await
            .map_err(HandlerError::Repository)?
            .ok_or_else(|| HandlerError::ProfileNotFound(user_id.to_string()))?;

        let request: MealRecommendationRequest = if body.trim().is_empty() {
            MealRecommendationRequest::default()
        } else {
            serde_json::from_str(body)?
        };

        let meal_slot = request.meal_slot();
        let recommendations = self.engine.recommend(&profile, &meal_slot).await;
        info!(slot = %meal_slot, count = recommendations.len(), "recommendations ready");

        Ok(MealRecommendationResponse {
            meal_type: meal_slot,
            recommendations: recommendations.into(),
        })
    }
}
