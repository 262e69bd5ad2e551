use std::{str::FromStr, time::Duration};

use crate::domain::{
    common::entities::app_errors::CoreError, generation::value_objects::GenerationSettings,
};

pub mod entities;
pub mod services;

pub const DEFAULT_RETRIEVAL_TOP_K: usize = 4;
pub const DEFAULT_PLAN_DAYS: u8 = 7;
pub const DEFAULT_HISTORY_LIMIT: usize = 3;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a pediatric nutrition expert focused on the \
health and development of children aged 0-5 years. All nutrient values provided are based on \
100 g of edible portion.";

#[derive(Clone, Debug)]
pub struct NutriplanConfig {
    pub llm: LLMConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMProvider {
    Groq,
    Gemini,
}

impl LLMProvider {
    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::Groq => "llama3-8b-8192",
            LLMProvider::Gemini => "gemini-2.0-flash",
        }
    }
}

impl FromStr for LLMProvider {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(LLMProvider::Groq),
            "gemini" => Ok(LLMProvider::Gemini),
            other => Err(CoreError::ConfigurationError(format!(
                "unknown LLM provider '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    /// `None` or blank means the generation service is unconfigured.
    pub api_key: Option<String>,
    /// Overrides the provider endpoint, mostly for tests and proxies.
    pub base_url: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub retrieval_top_k: usize,
    pub default_plan_days: u8,
    pub history_limit: usize,
    pub meal_plan: GenerationSettings,
    pub assessment: GenerationSettings,
    pub recipe_review: GenerationSettings,
}

impl PipelineConfig {
    /// Defaults matching the production prompts: plans and assessments run at
    /// temperature 0.3 with 3000 tokens, recipe reviews at 0.2 with 2000.
    pub fn for_provider(provider: LLMProvider) -> Self {
        let model = provider.default_model().to_string();
        let system_instruction = Some(DEFAULT_SYSTEM_INSTRUCTION.to_string());

        Self {
            retrieval_top_k: DEFAULT_RETRIEVAL_TOP_K,
            default_plan_days: DEFAULT_PLAN_DAYS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            meal_plan: GenerationSettings {
                model: model.clone(),
                temperature: 0.3,
                max_tokens: 3000,
                timeout: DEFAULT_REQUEST_TIMEOUT,
                system_instruction: system_instruction.clone(),
            },
            assessment: GenerationSettings {
                model: model.clone(),
                temperature: 0.3,
                max_tokens: 3000,
                timeout: DEFAULT_REQUEST_TIMEOUT,
                system_instruction: system_instruction.clone(),
            },
            recipe_review: GenerationSettings {
                model,
                temperature: 0.2,
                max_tokens: 2000,
                timeout: DEFAULT_REQUEST_TIMEOUT,
                system_instruction,
            },
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.meal_plan.model = model.to_string();
        self.assessment.model = model.to_string();
        self.recipe_review.model = model.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.meal_plan.timeout = timeout;
        self.assessment.timeout = timeout;
        self.recipe_review.timeout = timeout;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_provider(LLMProvider::Groq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse_is_case_insensitive() {
        assert_eq!("GROQ".parse::<LLMProvider>(), Ok(LLMProvider::Groq));
        assert_eq!(" gemini ".parse::<LLMProvider>(), Ok(LLMProvider::Gemini));
        assert!(matches!(
            "openai".parse::<LLMProvider>(),
            Err(CoreError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_with_model_applies_to_every_use_case() {
        let config = PipelineConfig::default().with_model("llama-3.1-8b-instant");
        assert_eq!(config.meal_plan.model, "llama-3.1-8b-instant");
        assert_eq!(config.assessment.model, "llama-3.1-8b-instant");
        assert_eq!(config.recipe_review.model, "llama-3.1-8b-instant");
        assert_eq!(config.recipe_review.max_tokens, 2000);
    }
}
