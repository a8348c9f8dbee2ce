use crate::error::AppError;
use crate::models::validation_types::PredictionResponse;
use reqwest::multipart::{Form, Part};

/// HTTP client for the remote detection service.
pub struct ValidatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl ValidatorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// POST the file to `/validate` as a multipart form with a single
    /// `file` field and decode the JSON body.
    ///
    /// The HTTP status is not inspected: the service is the sole
    /// authority, and an error body that still decodes as a JSON object
    /// yields a response with absent fields. Anything that fails to decode
    /// surfaces as an `AppError`.
    pub async fn predict(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PredictionResponse, AppError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/validate", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let prediction = response.json::<PredictionResponse>().await.map_err(|e| AppError {
            message: format!("Failed to parse prediction response: {}", e),
        })?;

        Ok(prediction)
    }
}
