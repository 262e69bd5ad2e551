use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    assessment::entities::AssessmentSections,
    common::entities::app_errors::{CoreError, ErrorKind},
};

/// Longest plan a caller may request.
pub const MAX_PLAN_DAYS: u8 = 14;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerateMealPlanInput {
    pub patient_id: Uuid,
    /// Free text; biases Day 1 only.
    pub available_ingredients: Option<String>,
    /// Replaces the stored religion for this request when non-blank.
    pub religion_override: Option<String>,
    /// Defaults to the configured plan length.
    pub duration_days: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MealPlanResponse {
    Text { text: String },
    Failure { error: String, kind: ErrorKind },
}

impl MealPlanResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self, MealPlanResponse::Failure { .. })
    }
}

impl From<Result<String, CoreError>> for MealPlanResponse {
    fn from(result: Result<String, CoreError>) -> Self {
        match result {
            Ok(text) => MealPlanResponse::Text { text },
            Err(error) => MealPlanResponse::Failure {
                error: error.to_string(),
                kind: error.kind(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AssessmentResponse {
    Sections(AssessmentSections),
    Failure { error: String, kind: ErrorKind },
}

impl AssessmentResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self, AssessmentResponse::Failure { .. })
    }
}

impl From<Result<AssessmentSections, CoreError>> for AssessmentResponse {
    fn from(result: Result<AssessmentSections, CoreError>) -> Self {
        match result {
            Ok(sections) => AssessmentResponse::Sections(sections),
            Err(error) => AssessmentResponse::Failure {
                error: error.to_string(),
                kind: error.kind(),
            },
        }
    }
}
