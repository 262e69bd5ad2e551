pub mod llm;
pub mod snapshot;
