use crate::models::validation_types::{Upload, ValidationState};
use crate::services::db::HistoryDb;
use crate::services::upload_service;
use crate::services::validator_client::ValidatorClient;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Request lifecycle store for the `/validate` endpoint.
///
/// Holds the inputs and outputs of the most recent validation attempt and
/// notifies subscribers after every transition. Cloning the store yields
/// another handle onto the same shared state.
///
/// Overlapping `validate` calls are not cancelled: each one runs to
/// completion and whichever resolves last wins the write into state.
#[derive(Clone)]
pub struct ValidationStore {
    client: Arc<ValidatorClient>,
    state_tx: Arc<watch::Sender<ValidationState>>,
    history: Option<HistoryDb>,
    archive_dir: Option<PathBuf>,
}

impl ValidationStore {
    pub fn new(client: ValidatorClient) -> Self {
        let (state_tx, _) = watch::channel(ValidationState::default());
        Self {
            client: Arc::new(client),
            state_tx: Arc::new(state_tx),
            history: None,
            archive_dir: None,
        }
    }

    /// Persist completed validations into a history database.
    pub fn with_history(mut self, history: HistoryDb) -> Self {
        self.history = Some(history);
        self
    }

    /// Keep a copy of every uploaded image under this directory.
    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ValidationState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified after each state transition.
    pub fn subscribe(&self) -> watch::Receiver<ValidationState> {
        self.state_tx.subscribe()
    }

    /// Upload a file for classification and apply the outcome to state.
    ///
    /// `loading` flips to true and `file` is replaced before the request is
    /// issued; prior result fields are left in place until the response
    /// lands. Never returns an error: every failure mode (connect error,
    /// body that fails to decode) is logged and absorbed, leaving the
    /// result fields at their pre-call values with `loading` back to false.
    pub async fn validate(&self, upload: Upload) {
        let file_name = upload.name.clone();
        let bytes = upload.bytes.clone();

        self.state_tx.send_modify(|state| {
            state.loading = true;
            state.file = Some(upload);
        });

        let archived = match &self.archive_dir {
            Some(dir) => match upload_service::archive_upload(dir, &file_name, &bytes).await {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Failed to archive upload {}: {}", file_name, e);
                    None
                }
            },
            None => None,
        };

        match self.client.predict(&file_name, bytes).await {
            Ok(prediction) => {
                self.state_tx.send_modify(|state| {
                    state.result = prediction.result;
                    state.probability = prediction.probability;
                    state.file_name = prediction.file_name.clone();
                    state.loading = false;
                });

                if let (Some(db), Some(verdict)) = (&self.history, prediction.result) {
                    let archived = archived.as_deref().map(|p| p.to_string_lossy().to_string());
                    if let Err(e) =
                        db.record(&file_name, verdict, prediction.probability, archived.as_deref())
                    {
                        tracing::warn!("Failed to record verification of {}: {}", file_name, e);
                    }
                }
            }
            Err(e) => {
                tracing::error!("Validation of {} failed: {}", file_name, e);
                self.state_tx.send_modify(|state| {
                    state.loading = false;
                });
            }
        }
    }

    /// Clear the selected file and any result fields. Does not touch
    /// `loading` and does not cancel an in-flight request.
    pub fn reset(&self) {
        self.state_tx.send_modify(|state| {
            state.file = None;
            state.result = None;
            state.probability = None;
            state.file_name.clear();
        });
    }
}
