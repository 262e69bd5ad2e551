use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// The JSON export read by the in-memory adapters. Every array is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub patients: Vec<PatientRecord>,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
    #[serde(default)]
    pub knowledge: Vec<KnowledgeRecord>,
    #[serde(default)]
    pub foods: Vec<FoodRow>,
}

/// Patient rows as the record screens stored them over time: numbers may be
/// strings, allergies a list or one comma-separated string, age in months or
/// in years.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(alias = "age_months")]
    pub age_in_months: Option<Loose>,
    /// Years; only used when `age_in_months` is absent.
    pub age: Option<Loose>,
    #[serde(alias = "weight_kg")]
    pub weight: Option<Loose>,
    #[serde(alias = "height_cm")]
    pub height: Option<Loose>,
    pub sex: Option<String>,
    #[serde(default)]
    pub allergies: Option<TextOrList>,
    #[serde(alias = "other_medical_problems")]
    pub medical_conditions: Option<String>,
    pub religion: Option<String>,
    pub breastfeeding: Option<Loose>,
    pub bmi_category: Option<String>,
    #[serde(alias = "parent_id")]
    pub guardian_id: Option<Uuid>,
    pub guardian_name: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRecord {
    pub patient_id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub kind: HistoryKindRecord,
    #[serde(alias = "note", alias = "plan_details")]
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKindRecord {
    #[default]
    Note,
    MealPlan,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeRecord {
    pub id: Uuid,
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default, alias = "pdf_name")]
    pub source_filename: String,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodRow {
    pub id: Uuid,
    #[serde(alias = "food_name_and_description")]
    pub name: String,
    #[serde(default, alias = "alternate_common_names")]
    pub alternate_names: Option<TextOrList>,
    pub energy_kcal: Option<Loose>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

/// A scalar that may have been stored as a number, a boolean or text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Loose {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Loose::Number(number) => *number,
            Loose::Text(text) => text.trim().parse().ok()?,
            Loose::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Loose::Bool(value) => Some(*value),
            Loose::Number(number) => Some(*number != 0.0),
            Loose::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "1" => Some(true),
                "no" | "n" | "false" | "0" => Some(false),
                _ => None,
            },
        }
    }
}
