use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::{entities::FoodRecord, ports::FoodCatalog},
    knowledge::{entities::KnowledgeEntry, ports::KnowledgeStore},
    patient::{
        entities::{HistoryEntry, PatientProfile},
        ports::PatientRepository,
    },
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientRepository {
    patients: Arc<HashMap<Uuid, PatientProfile>>,
    history: Arc<HashMap<Uuid, Vec<HistoryEntry>>>,
}

impl InMemoryPatientRepository {
    /// History is stored most recent first regardless of input order.
    pub fn new(
        patients: HashMap<Uuid, PatientProfile>,
        mut history: HashMap<Uuid, Vec<HistoryEntry>>,
    ) -> Self {
        for entries in history.values_mut() {
            entries.sort_by(|a, b| b.date.cmp(&a.date));
        }
        Self {
            patients: Arc::new(patients),
            history: Arc::new(history),
        }
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

impl PatientRepository for InMemoryPatientRepository {
    async fn get(&self, patient_id: Uuid) -> Result<Option<PatientProfile>, CoreError> {
        Ok(self.patients.get(&patient_id).cloned())
    }

    async fn get_history(&self, patient_id: Uuid) -> Result<Vec<HistoryEntry>, CoreError> {
        Ok(self.history.get(&patient_id).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgeStore {
    entries: Arc<Vec<KnowledgeEntry>>,
}

impl InMemoryKnowledgeStore {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn list(&self) -> Result<Vec<KnowledgeEntry>, CoreError> {
        Ok(self.entries.as_ref().clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFoodCatalog {
    foods: Arc<Vec<FoodRecord>>,
}

impl InMemoryFoodCatalog {
    pub fn new(foods: Vec<FoodRecord>) -> Self {
        Self {
            foods: Arc::new(foods),
        }
    }
}

impl FoodCatalog for InMemoryFoodCatalog {
    async fn list(&self) -> Result<Vec<FoodRecord>, CoreError> {
        Ok(self.foods.as_ref().clone())
    }
}
