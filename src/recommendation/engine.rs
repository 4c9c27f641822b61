use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::nutrition::{compute_macro_targets, MacroTargets};
use crate::profile::UserProfile;
use crate::recommendation::catalog::fallback_recommendations;
use crate::recommendation::generative::{GenerativeProvider, MealRequestSpec, ProviderError};
use crate::recommendation::{MealSlot, Recommendation, RECOMMENDATION_COUNT};

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a generative provider is wired in. Decided once when the engine
/// is built; the engine never probes for one later.
#[derive(Clone, Default)]
pub enum ProviderPort {
    #[default]
    Unconfigured,
    Configured(Arc<dyn GenerativeProvider>),
}

impl ProviderPort {
    pub fn is_configured(&self) -> bool {
        matches!(self, ProviderPort::Configured(_))
    }
}

impl std::fmt::Debug for ProviderPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderPort::Unconfigured => f.write_str("Unconfigured"),
            ProviderPort::Configured(provider) => write!(f, "Configured({})", provider.name()),
        }
    }
}

/// Produces meal recommendations for a profile.
///
/// Holds no per-request state, so one engine can serve any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    provider: ProviderPort,
    provider_timeout: Duration,
}

impl RecommendationEngine {
    pub fn new(provider: ProviderPort) -> Self {
        Self { provider, provider_timeout: DEFAULT_PROVIDER_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn provider(&self) -> &ProviderPort {
        &self.provider
    }

    pub fn compute_macro_targets(&self, profile: &UserProfile) -> MacroTargets {
        compute_macro_targets(profile)
    }

    /// Three candidate meals for `meal_slot`, each carrying one meal's share
    /// of the daily targets.
    ///
    /// Never fails. A missing provider, a provider error, a timeout or an
    /// unparseable reply all end in the static catalog for the slot.
    pub async fn recommend(
        &self,
        profile: &UserProfile,
        meal_slot: &MealSlot,
    ) -> [Recommendation; RECOMMENDATION_COUNT] {
        let per_meal = compute_macro_targets(profile).per_meal();
        let spec = MealRequestSpec::new(profile, meal_slot, per_meal);

        match self.try_provider(&spec).await {
            Ok(recommendations) => {
                info!(slot = %meal_slot, "using generated recommendations");
                recommendations
            }
            Err(ProviderError::Unavailable) => {
                debug!(slot = %meal_slot, "no generative provider configured, using catalog");
                fallback_recommendations(meal_slot, per_meal)
            }
            Err(err) => {
                warn!(slot = %meal_slot, error = %err, "generative provider failed, using catalog");
                fallback_recommendations(meal_slot, per_meal)
            }
        }
    }

    async fn try_provider(
        &self,
        spec: &MealRequestSpec,
    ) -> Result<[Recommendation; RECOMMENDATION_COUNT], ProviderError> {
        let ProviderPort::Configured(provider) = &self.provider else {
            return Err(ProviderError::Unavailable);
        };

        debug!(
            provider = provider.name(),
            slot = %spec.meal_slot,
            "requesting generated recommendations"
        );
        match tokio::time::timeout(self.provider_timeout, provider.generate(spec)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Transport(format!(
                "no response within {:?}",
                self.provider_timeout
            ))),
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ProviderPort::Unconfigured)
    }
}
