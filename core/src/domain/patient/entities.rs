use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-request snapshot of a child's nutritionally relevant attributes.
///
/// Identifying data is kept in [`PatientIdentity`] and [`HouseholdRef`] so the
/// prompt composer can take the whole profile without ever reading it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientProfile {
    pub id: Uuid,
    pub age_months: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub sex: Option<Sex>,
    pub allergies: Vec<String>,
    pub medical_conditions: Option<String>,
    pub religion: Option<String>,
    pub breastfeeding: Option<bool>,
    /// Category recorded by the clinic (e.g. from WHO BMI-for-age charts).
    pub bmi_category: Option<String>,
    pub identity: PatientIdentity,
    pub household: HouseholdRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientIdentity {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HouseholdRef {
    pub guardian_id: Option<Uuid>,
    pub guardian_name: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "Female"),
            Sex::Male => write!(f, "Male"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    Infant,
    Toddler,
    Preschooler,
}

impl AgeBand {
    pub fn keyword(&self) -> &'static str {
        match self {
            AgeBand::Infant => "infant",
            AgeBand::Toddler => "toddler",
            AgeBand::Preschooler => "preschool",
        }
    }
}

impl PatientProfile {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            age_months: None,
            weight_kg: None,
            height_cm: None,
            sex: None,
            allergies: Vec::new(),
            medical_conditions: None,
            religion: None,
            breastfeeding: None,
            bmi_category: None,
            identity: PatientIdentity::default(),
            household: HouseholdRef::default(),
        }
    }

    /// Body-mass index in kg/m², when both measurements are usable.
    pub fn bmi(&self) -> Option<f64> {
        match (self.weight_kg, self.height_cm) {
            (Some(weight), Some(height)) if weight > 0.0 && height > 0.0 => {
                let meters = height / 100.0;
                Some(weight / (meters * meters))
            }
            _ => None,
        }
    }

    pub fn is_under_six_months(&self) -> bool {
        matches!(self.age_months, Some(age) if age < 6)
    }

    pub fn age_band(&self) -> Option<AgeBand> {
        self.age_months.map(|age| match age {
            0..=11 => AgeBand::Infant,
            12..=35 => AgeBand::Toddler,
            _ => AgeBand::Preschooler,
        })
    }

    /// Returns a copy carrying `religion` instead of the stored value.
    /// Blank overrides leave the profile unchanged.
    pub fn with_religion_override(&self, religion: Option<&str>) -> Self {
        let mut profile = self.clone();
        if let Some(religion) = religion.map(str::trim).filter(|r| !r.is_empty()) {
            profile.religion = Some(religion.to_string());
        }
        profile
    }
}

/// Splits free-text allergy notes ("peanuts, egg; shrimp") into tokens.
pub fn parse_allergies(text: &str) -> Vec<String> {
    text.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| !is_placeholder(token))
        .map(str::to_string)
        .collect()
}

/// Values the record screens store instead of leaving a field empty.
pub fn is_placeholder(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "none" | "n/a" | "na" | "unknown" | "-"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Note,
    MealPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub kind: HistoryKind,
    pub text: String,
}
