pub mod assessment;
pub mod common;
pub mod food;
pub mod generation;
pub mod knowledge;
pub mod meal_plan;
pub mod patient;
pub mod prompt;
