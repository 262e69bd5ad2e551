use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use nutriplan_core::domain::{
    common::{LLMConfig, LLMProvider, NutriplanConfig, PipelineConfig},
    food::entities::FamilyRecipe,
};
use uuid::Uuid;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "nutriplan",
    version,
    about = "Generate meal plans and nutrition assessments for young children"
)]
pub struct Args {
    /// JSON export with patients, history, knowledge and foods
    #[arg(long, env = "NUTRIPLAN_SNAPSHOT", default_value = "snapshot.json", global = true)]
    pub snapshot: PathBuf,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "NUTRIPLAN_LOG_JSON", default_value_t = false, global = true)]
    pub log_json: bool,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long, env = "NUTRIPLAN_LLM_PROVIDER", default_value = "groq", global = true)]
    pub provider: LLMProvider,

    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, global = true)]
    pub groq_api_key: Option<String>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub gemini_api_key: Option<String>,

    /// Overrides the provider's default model
    #[arg(long, env = "NUTRIPLAN_MODEL", global = true)]
    pub model: Option<String>,

    #[arg(long, env = "NUTRIPLAN_LLM_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[arg(long, env = "NUTRIPLAN_TIMEOUT_SECS", default_value_t = 60, global = true)]
    pub timeout_secs: u64,

    #[arg(long, env = "NUTRIPLAN_RETRIEVAL_TOP_K", default_value_t = 4, global = true)]
    pub retrieval_top_k: usize,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a meal plan
    MealPlan {
        patient_id: Uuid,
        /// Ingredients available at home; used for Day 1 only
        #[arg(long)]
        ingredients: Option<String>,
        /// Religion to use instead of the stored one
        #[arg(long)]
        religion: Option<String>,
        /// Plan length in days
        #[arg(long)]
        days: Option<u8>,
    },
    /// Generate a sectioned nutrition assessment
    Assessment { patient_id: Uuid },
    /// Check family recipes against the child's restrictions
    ReviewRecipes {
        patient_id: Uuid,
        /// "NAME: DESCRIPTION", repeatable
        #[arg(long = "recipe", value_parser = parse_recipe, required = true)]
        recipes: Vec<FamilyRecipe>,
    },
}

fn parse_recipe(value: &str) -> Result<FamilyRecipe, String> {
    let (name, description) = value
        .split_once(':')
        .ok_or_else(|| "expected NAME: DESCRIPTION".to_string())?;
    let name = name.trim();
    if name.is_empty() {
        return Err("recipe name is empty".to_string());
    }
    Ok(FamilyRecipe {
        name: name.to_string(),
        description: description.trim().to_string(),
    })
}

impl From<&Args> for NutriplanConfig {
    fn from(args: &Args) -> Self {
        let llm = &args.llm;
        let timeout = Duration::from_secs(llm.timeout_secs);
        let api_key = match llm.provider {
            LLMProvider::Groq => llm.groq_api_key.clone(),
            LLMProvider::Gemini => llm.gemini_api_key.clone(),
        };

        let mut pipeline = PipelineConfig::for_provider(llm.provider).with_timeout(timeout);
        if let Some(model) = llm.model.as_deref() {
            pipeline = pipeline.with_model(model);
        }
        pipeline.retrieval_top_k = llm.retrieval_top_k;

        NutriplanConfig {
            llm: LLMConfig {
                provider: llm.provider,
                api_key,
                base_url: llm.base_url.clone(),
                request_timeout: timeout,
            },
            pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENT: &str = "00000000-0000-0000-0000-000000000001";

    #[test]
    fn test_meal_plan_flags() {
        let args = Args::try_parse_from([
            "nutriplan",
            "meal-plan",
            PATIENT,
            "--ingredients",
            "squash, eggs",
            "--days",
            "3",
        ])
        .unwrap();

        match args.command {
            Command::MealPlan {
                patient_id,
                ingredients,
                days,
                religion,
            } => {
                assert_eq!(patient_id, Uuid::from_u128(1));
                assert_eq!(ingredients.as_deref(), Some("squash, eggs"));
                assert_eq!(days, Some(3));
                assert_eq!(religion, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_recipes_are_parsed() {
        let args = Args::try_parse_from([
            "nutriplan",
            "review-recipes",
            PATIENT,
            "--recipe",
            "Tinola: chicken soup with papaya",
            "--recipe",
            "Champorado: chocolate rice porridge",
        ])
        .unwrap();

        let Command::ReviewRecipes { recipes, .. } = args.command else {
            panic!("expected review-recipes");
        };
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name, "Tinola");
        assert_eq!(recipes[1].description, "chocolate rice porridge");
    }

    #[test]
    fn test_recipe_without_description_is_rejected() {
        assert!(parse_recipe("Adobo").is_err());
        assert!(parse_recipe(": soup").is_err());
    }

    #[test]
    fn test_config_uses_the_selected_provider_key() {
        let args = Args::try_parse_from([
            "nutriplan",
            "--provider",
            "gemini",
            "--gemini-api-key",
            "g-key",
            "--groq-api-key",
            "q-key",
            "--model",
            "gemini-1.5-pro",
            "--timeout-secs",
            "10",
            "assessment",
            PATIENT,
        ])
        .unwrap();

        let config = NutriplanConfig::from(&args);

        assert_eq!(config.llm.provider, LLMProvider::Gemini);
        assert_eq!(config.llm.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.llm.request_timeout, Duration::from_secs(10));
        assert_eq!(config.pipeline.assessment.model, "gemini-1.5-pro");
        assert_eq!(config.pipeline.meal_plan.timeout, Duration::from_secs(10));
    }
}
