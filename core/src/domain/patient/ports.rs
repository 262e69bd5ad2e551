use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    patient::entities::{HistoryEntry, PatientProfile},
};

/// Read-only access to patient records and their prior notes and plans.
#[cfg_attr(test, mockall::automock)]
pub trait PatientRepository: Send + Sync {
    fn get(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Option<PatientProfile>, CoreError>> + Send;

    /// Prior notes and meal plans, most recent first.
    fn get_history(
        &self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Vec<HistoryEntry>, CoreError>> + Send;
}
