pub mod commands;
pub mod extract;
pub mod llm;
pub mod palette;
pub mod quiz;
pub mod schema;
pub mod table;
pub mod utils;
