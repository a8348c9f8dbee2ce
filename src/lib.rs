pub mod error;
pub mod models;
pub mod services;

pub use error::AppError;
pub use models::history_types::VerificationRecord;
pub use models::validation_types::{PredictionResponse, Upload, ValidationState, Verdict};
pub use services::db::HistoryDb;
pub use services::store::ValidationStore;
pub use services::validator_client::ValidatorClient;
