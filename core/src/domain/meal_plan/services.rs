use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    assessment::{entities::AssessmentSections, parser::parse_with_diagnostics},
    common::{entities::app_errors::CoreError, services::Service},
    food::{
        entities::{FamilyRecipe, FoodRecord},
        ports::FoodCatalog,
    },
    generation::{ports::LLMClient, services::generate},
    knowledge::{
        ports::KnowledgeStore,
        services::retrieve,
        value_objects::{RetrievalQuery, RetrievalResult},
    },
    meal_plan::{
        ports::MealPlanService,
        value_objects::{
            AssessmentResponse, GenerateMealPlanInput, MAX_PLAN_DAYS, MealPlanResponse,
        },
    },
    patient::{
        entities::{HistoryEntry, PatientProfile},
        ports::PatientRepository,
    },
    prompt::{
        services::compose,
        value_objects::{CompositionOptions, GenerationMode},
    },
};

impl<P, K, F, LLM> MealPlanService for Service<P, K, F, LLM>
where
    P: PatientRepository,
    K: KnowledgeStore,
    F: FoodCatalog,
    LLM: LLMClient,
{
    #[instrument(skip_all, fields(patient_id = %input.patient_id))]
    async fn generate_meal_plan(&self, input: GenerateMealPlanInput) -> MealPlanResponse {
        let result = self.meal_plan(input).await;
        log_failure(&result);
        result.into()
    }

    #[instrument(skip(self))]
    async fn generate_assessment(&self, patient_id: Uuid) -> AssessmentResponse {
        let result = self.assessment(patient_id).await;
        log_failure(&result);
        result.into()
    }

    #[instrument(skip(self, recipes), fields(recipes = recipes.len()))]
    async fn review_family_recipes(
        &self,
        patient_id: Uuid,
        recipes: Vec<FamilyRecipe>,
    ) -> MealPlanResponse {
        let result = self.recipe_review(patient_id, recipes).await;
        log_failure(&result);
        result.into()
    }
}

impl<P, K, F, LLM> Service<P, K, F, LLM>
where
    P: PatientRepository,
    K: KnowledgeStore,
    F: FoodCatalog,
    LLM: LLMClient,
{
    async fn meal_plan(&self, input: GenerateMealPlanInput) -> Result<String, CoreError> {
        let plan_days = match input.duration_days {
            None => self.config.default_plan_days,
            Some(days) if (1..=MAX_PLAN_DAYS).contains(&days) => days,
            Some(days) => {
                return Err(CoreError::Invalid(format!(
                    "duration_days must be between 1 and {MAX_PLAN_DAYS}, got {days}"
                )));
            }
        };

        let profile = self
            .load_profile(input.patient_id)
            .await?
            .with_religion_override(input.religion_override.as_deref());
        let retrieval = self.retrieve_knowledge(&profile).await;
        let foods = self.load_foods().await;

        let options = CompositionOptions {
            plan_days,
            ..CompositionOptions::default()
        };
        let context = compose(
            &profile,
            &retrieval,
            &foods,
            input.available_ingredients.as_deref(),
            GenerationMode::MealPlan,
            &options,
        );

        generate(&self.llm_client, &context, &self.config.meal_plan).await
    }

    async fn assessment(&self, patient_id: Uuid) -> Result<AssessmentSections, CoreError> {
        let profile = self.load_profile(patient_id).await?;
        let history = self.load_history(patient_id).await;
        let retrieval = self.retrieve_knowledge(&profile).await;
        let foods = self.load_foods().await;

        let options = CompositionOptions {
            history,
            history_limit: self.config.history_limit,
            ..CompositionOptions::default()
        };
        let context = compose(
            &profile,
            &retrieval,
            &foods,
            None,
            GenerationMode::Assessment,
            &options,
        );

        let raw = generate(&self.llm_client, &context, &self.config.assessment).await?;
        let (sections, degraded) = parse_with_diagnostics(&raw);
        if let Some(warning) = degraded {
            warn!(
                placed_in = warning.placed_in.as_str(),
                raw_chars = warning.raw_chars,
                "assessment reply had no recognizable headings"
            );
        }

        Ok(sections)
    }

    async fn recipe_review(
        &self,
        patient_id: Uuid,
        recipes: Vec<FamilyRecipe>,
    ) -> Result<String, CoreError> {
        if recipes.is_empty() {
            return Err(CoreError::Invalid("no recipes to review".to_string()));
        }

        let profile = self.load_profile(patient_id).await?;
        let foods = self.load_foods().await;

        let options = CompositionOptions {
            recipes,
            ..CompositionOptions::default()
        };
        let context = compose(
            &profile,
            &RetrievalResult::empty(),
            &foods,
            None,
            GenerationMode::RecipeReview,
            &options,
        );

        generate(&self.llm_client, &context, &self.config.recipe_review).await
    }

    async fn load_profile(&self, patient_id: Uuid) -> Result<PatientProfile, CoreError> {
        self.patient_repository
            .get(patient_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn load_history(&self, patient_id: Uuid) -> Vec<HistoryEntry> {
        match self.patient_repository.get_history(patient_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "history unavailable, continuing without it");
                Vec::new()
            }
        }
    }

    async fn retrieve_knowledge(&self, profile: &PatientProfile) -> RetrievalResult {
        let query = RetrievalQuery::from_profile(profile);
        match self.knowledge_store.list().await {
            Ok(corpus) => {
                let result = retrieve(&query, &corpus, self.config.retrieval_top_k);
                info!(
                    corpus = corpus.len(),
                    fragments = result.len(),
                    "knowledge retrieved"
                );
                result
            }
            Err(e) => {
                warn!(error = %e, "knowledge store unavailable, continuing without background");
                RetrievalResult::empty()
            }
        }
    }

    async fn load_foods(&self) -> Vec<FoodRecord> {
        match self.food_catalog.list().await {
            Ok(foods) => foods,
            Err(e) => {
                warn!(error = %e, "food catalog unavailable, continuing without whitelist");
                Vec::new()
            }
        }
    }
}

fn log_failure<T>(result: &Result<T, CoreError>) {
    if let Err(e) = result {
        error!(kind = ?e.kind(), error = %e, "generation pipeline failed");
    }
}
