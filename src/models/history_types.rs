use crate::models::validation_types::Verdict;
use serde::Serialize;

/// One completed validation as persisted in the history database.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationRecord {
    pub id: String,
    pub file_name: String,
    pub file_path: Option<String>,
    pub result: Verdict,
    pub probability: Option<f64>,
    pub verified_at: i64,
}
