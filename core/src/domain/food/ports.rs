use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, food::entities::FoodRecord};

#[cfg_attr(test, mockall::automock)]
pub trait FoodCatalog: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<FoodRecord>, CoreError>> + Send;
}
