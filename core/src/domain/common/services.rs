use crate::domain::{
    common::PipelineConfig, food::ports::FoodCatalog, generation::ports::LLMClient,
    knowledge::ports::KnowledgeStore, patient::ports::PatientRepository,
};

/// Holds the read-only adapters and the immutable pipeline configuration.
///
/// Each use case is implemented on this type in its own module.
#[derive(Clone)]
pub struct Service<P, K, F, LLM>
where
    P: PatientRepository,
    K: KnowledgeStore,
    F: FoodCatalog,
    LLM: LLMClient,
{
    pub(crate) patient_repository: P,
    pub(crate) knowledge_store: K,
    pub(crate) food_catalog: F,
    pub(crate) llm_client: LLM,
    pub(crate) config: PipelineConfig,
}

impl<P, K, F, LLM> Service<P, K, F, LLM>
where
    P: PatientRepository,
    K: KnowledgeStore,
    F: FoodCatalog,
    LLM: LLMClient,
{
    pub fn new(
        patient_repository: P,
        knowledge_store: K,
        food_catalog: F,
        llm_client: LLM,
        config: PipelineConfig,
    ) -> Self {
        Self {
            patient_repository,
            knowledge_store,
            food_catalog,
            llm_client,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
