use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api_connection::endpoints::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::api_connection::ChatClient;
use crate::recommendation::{LlmMealProvider, ProviderPort};

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "MEAL_PLANNER_LLM_BASE_URL";
pub const MODEL_ENV_VAR: &str = "MEAL_PLANNER_LLM_MODEL";
pub const TIMEOUT_ENV_VAR: &str = "MEAL_PLANNER_LLM_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the generative recommendation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// `None` means no provider. That is the expected state when no key is set.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderSettings {
    /// Reads settings from the process environment, loading `.env` first.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match non_blank(TIMEOUT_ENV_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        "{}='{}' is not a positive integer, using {}s",
                        TIMEOUT_ENV_VAR, raw, DEFAULT_TIMEOUT_SECS
                    );
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            api_key: non_blank(API_KEY_ENV_VAR),
            base_url: non_blank(BASE_URL_ENV_VAR).unwrap_or(defaults.base_url),
            model: non_blank(MODEL_ENV_VAR).unwrap_or(defaults.model),
            timeout,
        }
    }

    /// Resolves the provider port. A missing key, or a client that cannot be
    /// built, leaves the provider unconfigured.
    pub fn into_port(self) -> ProviderPort {
        let Some(api_key) = self.api_key else {
            info!(
                "{} not set, recommendations will come from the built-in catalog",
                API_KEY_ENV_VAR
            );
            return ProviderPort::Unconfigured;
        };

        match ChatClient::new(&self.base_url, &api_key, &self.model, self.timeout) {
            Ok(client) => {
                info!(
                    model = %self.model,
                    base_url = %self.base_url,
                    "generative provider configured"
                );
                ProviderPort::Configured(Arc::new(LlmMealProvider::new(client)))
            }
            Err(e) => {
                warn!("could not build generative provider client: {}", e);
                ProviderPort::Unconfigured
            }
        }
    }
}
