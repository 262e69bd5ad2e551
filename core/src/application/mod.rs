use tracing::warn;

use crate::{
    domain::{
        common::{NutriplanConfig, entities::app_errors::CoreError, services::Service},
        generation::ports::LLMClient,
    },
    infrastructure::{
        llm::ConfiguredLLMClient,
        snapshot::{
            Snapshot,
            repositories::{InMemoryFoodCatalog, InMemoryKnowledgeStore, InMemoryPatientRepository},
        },
    },
};

pub type NutriplanService = Service<
    InMemoryPatientRepository,
    InMemoryKnowledgeStore,
    InMemoryFoodCatalog,
    ConfiguredLLMClient,
>;

/// Wires the snapshot stores and the configured generation client.
///
/// A missing API key is not fatal here: every generation request then fails
/// with a configuration error instead.
pub fn create_service(
    config: NutriplanConfig,
    snapshot: Snapshot,
) -> Result<NutriplanService, CoreError> {
    let llm_client = ConfiguredLLMClient::from_config(&config.llm)?;
    if !llm_client.is_configured() {
        warn!(provider = ?config.llm.provider, "no API key configured, generation requests will fail");
    }

    Ok(Service::new(
        snapshot.patients,
        snapshot.knowledge,
        snapshot.foods,
        llm_client,
        config.pipeline,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::{LLMConfig, LLMProvider, PipelineConfig, entities::app_errors::ErrorKind},
        meal_plan::{GenerateMealPlanInput, MealPlanResponse, MealPlanService},
    };
    use std::time::Duration;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_service_without_key_reports_configuration_error() {
        let snapshot = Snapshot::from_json_str(
            r#"{"patients": [{"id": "00000000-0000-0000-0000-000000000001", "age_in_months": 9}]}"#,
        )
        .unwrap();
        let config = NutriplanConfig {
            llm: LLMConfig {
                provider: LLMProvider::Groq,
                api_key: None,
                base_url: None,
                request_timeout: Duration::from_secs(5),
            },
            pipeline: PipelineConfig::default(),
        };

        let service = create_service(config, snapshot).unwrap();
        let response = service
            .generate_meal_plan(GenerateMealPlanInput {
                patient_id: Uuid::from_u128(1),
                ..GenerateMealPlanInput::default()
            })
            .await;

        assert!(matches!(
            response,
            MealPlanResponse::Failure {
                kind: ErrorKind::Configuration,
                ..
            }
        ));
    }
}
