use std::fmt;

use crate::domain::{
    common::{DEFAULT_HISTORY_LIMIT, DEFAULT_PLAN_DAYS},
    food::entities::FamilyRecipe,
    patient::entities::HistoryEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    MealPlan,
    Assessment,
    RecipeReview,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::MealPlan => write!(f, "meal_plan"),
            GenerationMode::Assessment => write!(f, "assessment"),
            GenerationMode::RecipeReview => write!(f, "recipe_review"),
        }
    }
}

/// The fully composed instruction document sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub mode: GenerationMode,
    pub text: String,
}

/// Mode-specific inputs to the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionOptions {
    pub plan_days: u8,
    /// Prior notes and plans, most recent first. Used in assessment mode.
    pub history: Vec<HistoryEntry>,
    pub history_limit: usize,
    /// Recipes under review. Used in recipe-review mode.
    pub recipes: Vec<FamilyRecipe>,
}

impl Default for CompositionOptions {
    fn default() -> Self {
        Self {
            plan_days: DEFAULT_PLAN_DAYS,
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            recipes: Vec::new(),
        }
    }
}
