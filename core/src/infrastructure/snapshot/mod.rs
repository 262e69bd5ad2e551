use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use tracing::{info, warn};

use uuid::Uuid;

use crate::domain::{
    food::entities::FoodRecord,
    knowledge::entities::KnowledgeEntry,
    patient::entities::{HistoryEntry, PatientProfile},
};

pub mod mappers;
pub mod models;
pub mod repositories;

use models::SnapshotDocument;
use repositories::{InMemoryFoodCatalog, InMemoryKnowledgeStore, InMemoryPatientRepository};

/// Read-only stores loaded from a JSON export.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub patients: InMemoryPatientRepository,
    pub knowledge: InMemoryKnowledgeStore,
    pub foods: InMemoryFoodCatalog,
}

impl Snapshot {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("failed to load snapshot {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let document: SnapshotDocument =
            serde_json::from_str(json).context("snapshot is not valid JSON")?;
        Ok(Self::from(document))
    }
}

impl From<SnapshotDocument> for Snapshot {
    fn from(document: SnapshotDocument) -> Self {
        let mut patients: HashMap<Uuid, PatientProfile> = HashMap::new();
        for record in &document.patients {
            if patients.contains_key(&record.id) {
                warn!(patient_id = %record.id, "duplicate patient in snapshot, keeping the first");
                continue;
            }
            patients.insert(record.id, PatientProfile::from(record));
        }

        let mut history: HashMap<Uuid, Vec<HistoryEntry>> = HashMap::new();
        for record in &document.history {
            history
                .entry(record.patient_id)
                .or_default()
                .push(HistoryEntry::from(record));
        }

        let knowledge: Vec<KnowledgeEntry> = document.knowledge.iter().map(Into::into).collect();
        let foods: Vec<FoodRecord> = document
            .foods
            .iter()
            .map(FoodRecord::from)
            .filter(|food| !food.name.is_empty())
            .collect();

        info!(
            patients = patients.len(),
            knowledge = knowledge.len(),
            foods = foods.len(),
            "snapshot loaded"
        );

        Self {
            patients: InMemoryPatientRepository::new(patients, history),
            knowledge: InMemoryKnowledgeStore::new(knowledge),
            foods: InMemoryFoodCatalog::new(foods),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        food::ports::FoodCatalog,
        knowledge::ports::KnowledgeStore,
        patient::{
            entities::{HistoryKind, Sex},
            ports::PatientRepository,
        },
    };

    const SNAPSHOT: &str = r#"{
        "patients": [
            {
                "id": "00000000-0000-0000-0000-000000000001",
                "first_name": "Liza",
                "age_in_months": 4,
                "weight": "6.2",
                "height": 61,
                "sex": "F",
                "allergies": "peanuts; egg",
                "medical_conditions": "none",
                "religion": "Islam",
                "breastfeeding": "yes",
                "parent_id": "00000000-0000-0000-0000-0000000000aa",
                "address": "7 Luna Street"
            },
            {
                "id": "00000000-0000-0000-0000-000000000002",
                "age": 2,
                "allergies": ["shrimp", "N/A"],
                "other_medical_problems": "anemia"
            }
        ],
        "history": [
            {"patient_id": "00000000-0000-0000-0000-000000000002", "date": "2024-03-01T08:00:00Z", "kind": "meal_plan", "plan_details": "Older plan"},
            {"patient_id": "00000000-0000-0000-0000-000000000002", "date": "2024-04-01T08:00:00Z", "note": "Newer note"}
        ],
        "knowledge": [
            {"id": "00000000-0000-0000-0000-000000000010", "ai_summary": "Breast milk covers all needs before 6 months.", "pdf_name": "who.pdf"}
        ],
        "foods": [
            {"id": "00000000-0000-0000-0000-000000000020", "food_name_and_description": "Rice porridge", "alternate_common_names": "lugaw, arroz caldo", "energy_kcal": 72},
            {"id": "00000000-0000-0000-0000-000000000021", "name": "  "}
        ]
    }"#;

    #[tokio::test]
    async fn test_legacy_patient_shapes_are_normalized() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();

        let infant = snapshot
            .patients
            .get(Uuid::from_u128(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(infant.age_months, Some(4));
        assert_eq!(infant.weight_kg, Some(6.2));
        assert_eq!(infant.height_cm, Some(61.0));
        assert_eq!(infant.sex, Some(Sex::Female));
        assert_eq!(infant.allergies, vec!["peanuts", "egg"]);
        assert_eq!(infant.medical_conditions, None);
        assert_eq!(infant.breastfeeding, Some(true));
        assert_eq!(infant.household.guardian_id, Some(Uuid::from_u128(0xaa)));

        let toddler = snapshot
            .patients
            .get(Uuid::from_u128(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(toddler.age_months, Some(24));
        assert_eq!(toddler.allergies, vec!["shrimp"]);
        assert_eq!(toddler.medical_conditions.as_deref(), Some("anemia"));
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();

        let history = snapshot
            .patients
            .get_history(Uuid::from_u128(2))
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "Newer note");
        assert_eq!(history[0].kind, HistoryKind::Note);
        assert_eq!(history[1].kind, HistoryKind::MealPlan);
        assert!(
            snapshot
                .patients
                .get_history(Uuid::from_u128(1))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_foods_and_knowledge_are_loaded() {
        let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();

        let foods = snapshot.foods.list().await.unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Rice porridge");
        assert_eq!(foods[0].alternate_names, vec!["lugaw", "arroz caldo"]);
        assert_eq!(foods[0].energy_kcal, Some(72.0));

        let knowledge = snapshot.knowledge.list().await.unwrap();
        assert_eq!(knowledge[0].source_filename, "who.pdf");
    }

    #[tokio::test]
    async fn test_unknown_patient_is_none() {
        let snapshot = Snapshot::from_json_str(r#"{"patients": []}"#).unwrap();
        assert!(snapshot.patients.is_empty());
        assert!(
            snapshot
                .patients
                .get(Uuid::from_u128(9))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let error = Snapshot::from_json_str("{not json").unwrap_err();
        assert!(error.to_string().contains("snapshot is not valid JSON"));
    }
}
