use serde::{Deserialize, Serialize};

/// Binary classification returned by the detection service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "real",
            Verdict::Fake => "fake",
        }
    }
}

/// One file handed to `validate`: the picker name plus the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Body of a `/validate` response. Every field defaults so a JSON object
/// missing keys still decodes (absent fields stay absent in state).
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub result: Option<Verdict>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(rename = "fileName", default)]
    pub file_name: String,
}

/// Outcome of the most recent validation attempt, as observed by the UI.
#[derive(Debug, Clone, Default)]
pub struct ValidationState {
    pub file: Option<Upload>,
    pub result: Option<Verdict>,
    pub probability: Option<f64>,
    pub file_name: String,
    pub loading: bool,
}
