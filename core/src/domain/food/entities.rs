use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A food the generator is allowed to name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    /// Energy per 100 g edible portion.
    pub energy_kcal: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FoodRecord {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alternate_names: Vec::new(),
            energy_kcal: None,
            tags: Vec::new(),
        }
    }
}

/// A recipe submitted by a guardian for suitability review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FamilyRecipe {
    pub name: String,
    pub description: String,
}
