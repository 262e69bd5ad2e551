pub mod entities;
pub mod helpers;
pub mod parser;

pub use entities::*;
