use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A distilled summary of an uploaded reference document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KnowledgeEntry {
    pub id: Uuid,
    pub ai_summary: String,
    pub source_filename: String,
    pub uploaded_at: DateTime<Utc>,
}
