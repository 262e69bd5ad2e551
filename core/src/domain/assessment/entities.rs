use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    PatientProfileSummary,
    NutritionalPriorities,
    AgeAppropriateGuidelines,
    PracticalTips,
    SevenDayMealPlan,
    AssessmentHistory,
    NextAssessment,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::PatientProfileSummary,
        SectionKey::NutritionalPriorities,
        SectionKey::AgeAppropriateGuidelines,
        SectionKey::PracticalTips,
        SectionKey::SevenDayMealPlan,
        SectionKey::AssessmentHistory,
        SectionKey::NextAssessment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::PatientProfileSummary => "patient_profile_summary",
            SectionKey::NutritionalPriorities => "nutritional_priorities",
            SectionKey::AgeAppropriateGuidelines => "age_appropriate_guidelines",
            SectionKey::PracticalTips => "practical_tips",
            SectionKey::SevenDayMealPlan => "seven_day_meal_plan",
            SectionKey::AssessmentHistory => "assessment_history",
            SectionKey::NextAssessment => "next_assessment",
        }
    }

    /// The heading the generator is asked to emit verbatim.
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKey::PatientProfileSummary => "Patient Profile Summary",
            SectionKey::NutritionalPriorities => "Nutritional Priorities",
            SectionKey::AgeAppropriateGuidelines => "Age-Appropriate Guidelines",
            SectionKey::PracticalTips => "Practical Tips",
            SectionKey::SevenDayMealPlan => "7-Day Meal Plan",
            SectionKey::AssessmentHistory => "Assessment History",
            SectionKey::NextAssessment => "Next Assessment",
        }
    }
}

/// A generated assessment split into its seven fixed sections.
/// Missing sections are empty strings, never absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentSections {
    pub patient_profile_summary: String,
    pub nutritional_priorities: String,
    pub age_appropriate_guidelines: String,
    pub practical_tips: String,
    pub seven_day_meal_plan: String,
    pub assessment_history: String,
    pub next_assessment: String,
}

impl AssessmentSections {
    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::PatientProfileSummary => &self.patient_profile_summary,
            SectionKey::NutritionalPriorities => &self.nutritional_priorities,
            SectionKey::AgeAppropriateGuidelines => &self.age_appropriate_guidelines,
            SectionKey::PracticalTips => &self.practical_tips,
            SectionKey::SevenDayMealPlan => &self.seven_day_meal_plan,
            SectionKey::AssessmentHistory => &self.assessment_history,
            SectionKey::NextAssessment => &self.next_assessment,
        }
    }

    pub fn set(&mut self, key: SectionKey, value: String) {
        let slot = match key {
            SectionKey::PatientProfileSummary => &mut self.patient_profile_summary,
            SectionKey::NutritionalPriorities => &mut self.nutritional_priorities,
            SectionKey::AgeAppropriateGuidelines => &mut self.age_appropriate_guidelines,
            SectionKey::PracticalTips => &mut self.practical_tips,
            SectionKey::SevenDayMealPlan => &mut self.seven_day_meal_plan,
            SectionKey::AssessmentHistory => &mut self.assessment_history,
            SectionKey::NextAssessment => &mut self.next_assessment,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        SectionKey::ALL.iter().all(|key| self.get(*key).is_empty())
    }
}

/// The parser fell back to placing the whole reply in one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDegradedWarning {
    pub placed_in: SectionKey,
    pub raw_chars: usize,
}
