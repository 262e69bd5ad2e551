use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, knowledge::entities::KnowledgeEntry};

#[cfg_attr(test, mockall::automock)]
pub trait KnowledgeStore: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<KnowledgeEntry>, CoreError>> + Send;
}
