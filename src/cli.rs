use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::profile::UserProfile;

#[derive(Parser, Debug)]
#[command(author, version, about = "Nutrition targets and meal recommendations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print daily and per-meal calorie and macro targets
    Targets {
        /// Path to a JSON user profile
        #[arg(short, long)]
        profile: PathBuf,
    },
    /// Print three meal recommendations for a meal slot
    Recommend {
        /// Path to a JSON user profile
        #[arg(short, long)]
        profile: PathBuf,
        /// breakfast, lunch or dinner (anything else is served as dinner)
        #[arg(short, long)]
        meal_type: Option<String>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

pub async fn load_profile(path: &Path) -> Result<UserProfile> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse profile file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_recommend() {
        let args = ["meal_planner", "recommend", "-p", "me.json", "--meal-type", "dinner"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(
            cli.command,
            Command::Recommend {
                profile: PathBuf::from("me.json"),
                meal_type: Some("dinner".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_targets_requires_profile() {
        assert!(Cli::try_parse_from(["meal_planner", "targets"]).is_err());
        let cli = Cli::try_parse_from(["meal_planner", "targets", "--profile", "p.json"]).unwrap();
        assert_eq!(cli.command, Command::Targets { profile: PathBuf::from("p.json") });
    }

    #[tokio::test]
    async fn test_load_profile_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"gender": "male", "weight": 80, "height": 180, "age": 25}}"#).unwrap();
        let profile = load_profile(file.path()).await.unwrap();
        assert_eq!(profile.weight_kg, 80.0);

        let err = load_profile(Path::new("/definitely/not/here.json")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read profile file"));
    }
}
