pub mod history_types;
pub mod validation_types;
