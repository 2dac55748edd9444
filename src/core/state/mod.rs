// Worksheet mapping state and checkpoint persistence

pub mod manager;
pub mod mapping;

pub use manager::StateManager;
pub use mapping::{WorksheetMapping, WorksheetMappingBuilder};
