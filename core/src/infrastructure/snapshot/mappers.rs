use chrono::{DateTime, Utc};

use crate::{
    domain::{
        food::entities::FoodRecord,
        knowledge::entities::KnowledgeEntry,
        patient::entities::{
            HistoryEntry, HistoryKind, HouseholdRef, PatientIdentity, PatientProfile, Sex,
            is_placeholder, parse_allergies,
        },
    },
    infrastructure::snapshot::models::{
        FoodRow, HistoryKindRecord, HistoryRecord, KnowledgeRecord, PatientRecord, TextOrList,
    },
};

impl From<&PatientRecord> for PatientProfile {
    fn from(record: &PatientRecord) -> Self {
        let age_months = record
            .age_in_months
            .as_ref()
            .and_then(|age| age.as_f64())
            .or_else(|| record.age.as_ref().and_then(|age| age.as_f64()).map(|y| y * 12.0))
            .filter(|months| *months >= 0.0)
            .map(|months| months.round() as u32);

        Self {
            id: record.id,
            age_months,
            weight_kg: positive(record.weight.as_ref().and_then(|w| w.as_f64())),
            height_cm: positive(record.height.as_ref().and_then(|h| h.as_f64())),
            sex: record.sex.as_deref().and_then(parse_sex),
            allergies: match &record.allergies {
                Some(TextOrList::Text(text)) => parse_allergies(text),
                Some(TextOrList::List(items)) => items
                    .iter()
                    .flat_map(|item| parse_allergies(item))
                    .collect(),
                None => Vec::new(),
            },
            medical_conditions: meaningful(record.medical_conditions.as_deref()),
            religion: meaningful(record.religion.as_deref()),
            breastfeeding: record.breastfeeding.as_ref().and_then(|b| b.as_bool()),
            bmi_category: meaningful(record.bmi_category.as_deref()),
            identity: PatientIdentity {
                first_name: record.first_name.clone(),
                last_name: record.last_name.clone(),
            },
            household: HouseholdRef {
                guardian_id: record.guardian_id,
                guardian_name: record.guardian_name.clone(),
                address: record.address.clone(),
                contact_number: record.contact_number.clone(),
            },
        }
    }
}

impl From<&HistoryRecord> for HistoryEntry {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            date: record.date,
            kind: match record.kind {
                HistoryKindRecord::Note => HistoryKind::Note,
                HistoryKindRecord::MealPlan => HistoryKind::MealPlan,
            },
            text: record.text.clone(),
        }
    }
}

impl From<&KnowledgeRecord> for KnowledgeEntry {
    fn from(record: &KnowledgeRecord) -> Self {
        Self {
            id: record.id,
            ai_summary: record.ai_summary.clone(),
            source_filename: record.source_filename.clone(),
            uploaded_at: record.uploaded_at.unwrap_or_else(DateTime::<Utc>::default),
        }
    }
}

impl From<&FoodRow> for FoodRecord {
    fn from(row: &FoodRow) -> Self {
        Self {
            id: row.id,
            name: row.name.trim().to_string(),
            alternate_names: match &row.alternate_names {
                Some(TextOrList::Text(text)) => text
                    .split([',', ';'])
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
                Some(TextOrList::List(items)) => items.clone(),
                None => Vec::new(),
            },
            energy_kcal: row.energy_kcal.as_ref().and_then(|e| e.as_f64()),
            tags: row.tags.clone(),
        }
    }
}

fn parse_sex(value: &str) -> Option<Sex> {
    match value.trim().to_ascii_lowercase().as_str() {
        "female" | "f" | "girl" => Some(Sex::Female),
        "male" | "m" | "boy" => Some(Sex::Male),
        _ => None,
    }
}

fn meaningful(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !is_placeholder(text))
        .map(str::to_string)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}
