use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use meal_planner::cli::{load_profile, parse_args, Command};
use meal_planner::config::ProviderSettings;
use meal_planner::handler::{InMemoryProfiles, MealRecommendationHandler, MealRecommendationRequest};
use meal_planner::nutrition::compute_macro_targets;
use meal_planner::recommendation::RecommendationEngine;

// Profiles loaded from disk are served under this id.
const LOCAL_USER_ID: &str = "local";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    match parse_args().command {
        Command::Targets { profile } => {
            let profile = load_profile(&profile).await?;
            let daily = compute_macro_targets(&profile);
            let output = json!({ "daily": daily, "per_meal": daily.per_meal() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Recommend { profile, meal_type } => {
            let profile = load_profile(&profile).await?;
            let settings = ProviderSettings::from_env();
            let engine = RecommendationEngine::new(settings.clone().into_port())
                .with_timeout(settings.timeout);

            let mut profiles = InMemoryProfiles::new();
            profiles.insert(LOCAL_USER_ID, profile);
            let handler = MealRecommendationHandler::new(Arc::new(profiles), engine);

            let body = serde_json::to_string(&MealRecommendationRequest { meal_type })?;
            let response = handler
                .handle(LOCAL_USER_ID, &body)
                .await
                .context("Failed to generate recommendations")?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
