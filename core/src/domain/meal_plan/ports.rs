use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    food::entities::FamilyRecipe,
    meal_plan::value_objects::{AssessmentResponse, GenerateMealPlanInput, MealPlanResponse},
};

/// The generation use cases. Failures are reported inside the response
/// value, so these calls never return an error.
pub trait MealPlanService: Send + Sync {
    fn generate_meal_plan(
        &self,
        input: GenerateMealPlanInput,
    ) -> impl Future<Output = MealPlanResponse> + Send;

    fn generate_assessment(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = AssessmentResponse> + Send;

    /// Asks whether each family recipe suits the child.
    fn review_family_recipes(
        &self,
        patient_id: Uuid,
        recipes: Vec<FamilyRecipe>,
    ) -> impl Future<Output = MealPlanResponse> + Send;
}
