use crate::state::messages::PersistResponse;
use log::{debug, error};
use standings_core::{Persister, Snapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

pub type SaveSlot = watch::Sender<Option<Snapshot>>;

/// Latest-value channel between the store listener and the worker.
pub fn save_slot() -> (SaveSlot, watch::Receiver<Option<Snapshot>>) {
    watch::channel(None)
}

/// Park `snapshot` for the worker without waiting. An unsaved older snapshot
/// is overwritten, so the newest state is always the one written.
pub fn request_save(slot: &SaveSlot, snapshot: Snapshot) {
    slot.send_modify(|pending| *pending = Some(snapshot));
}

/// Writes parked snapshots through the persister off the UI task.
///
/// Runs until every [`SaveSlot`] is dropped, saving whatever was still parked
/// at that point before returning.
pub struct PersistWorker {
    persister: Arc<dyn Persister>,
    requests: watch::Receiver<Option<Snapshot>>,
    responses: mpsc::Sender<PersistResponse>,
}

impl PersistWorker {
    pub fn new(
        persister: Arc<dyn Persister>,
        requests: watch::Receiver<Option<Snapshot>>,
        responses: mpsc::Sender<PersistResponse>,
    ) -> Self {
        Self {
            persister,
            requests,
            responses,
        }
    }

    pub async fn run(mut self) {
        // `changed` still yields an unseen value after the slot is closed.
        while self.requests.changed().await.is_ok() {
            let Some(snapshot) = self.requests.borrow_and_update().clone() else {
                continue;
            };

            let response = self.save(snapshot).await;
            if self.responses.send(response).await.is_err() {
                debug!("UI gone, persist response dropped");
            }
        }
        debug!("persist worker finished");
    }

    async fn save(&self, snapshot: Snapshot) -> PersistResponse {
        let persister = self.persister.clone();
        let outcome = tokio::task::spawn_blocking(move || persister.save(&snapshot)).await;
        match outcome {
            Ok(Ok(())) => {
                debug!("state saved");
                PersistResponse::Saved
            }
            Ok(Err(e)) => {
                error!("Failed to save state: {e}");
                PersistResponse::Failed {
                    message: e.to_string(),
                }
            }
            Err(e) => {
                error!("Save task aborted: {e}");
                PersistResponse::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
