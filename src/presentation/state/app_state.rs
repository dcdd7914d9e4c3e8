use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{BlobStore, ReviewEngine, TranscriptionEngine};
use crate::application::services::{Orchestrator, RetryPolicy, UploadService};
use crate::presentation::config::Settings;

pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub upload_service: Arc<UploadService>,
    pub orchestrator: Arc<Orchestrator>,
    pub blob_store: Arc<dyn BlobStore>,
    pub max_upload_size_bytes: usize,
}

impl AppState {
    /// Wires the services around one blob store. Retries are disabled.
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        transcriber: Arc<dyn TranscriptionEngine>,
        reviewer: Arc<dyn ReviewEngine>,
    ) -> Self {
        Self {
            upload_service: Arc::new(UploadService::new(Arc::clone(&blob_store))),
            orchestrator: Arc::new(Orchestrator::new(
                Arc::clone(&blob_store),
                transcriber,
                reviewer,
            )),
            blob_store,
            max_upload_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_BYTES,
        }
    }

    pub fn from_settings(
        settings: &Settings,
        blob_store: Arc<dyn BlobStore>,
        transcriber: Arc<dyn TranscriptionEngine>,
        reviewer: Arc<dyn ReviewEngine>,
    ) -> Self {
        let retry_policy = RetryPolicy::new(
            settings.orchestrator.max_attempts,
            Duration::from_millis(settings.orchestrator.initial_backoff_ms),
            Duration::from_millis(settings.orchestrator.max_backoff_ms),
        );

        Self {
            upload_service: Arc::new(UploadService::new(Arc::clone(&blob_store))),
            orchestrator: Arc::new(
                Orchestrator::new(Arc::clone(&blob_store), transcriber, reviewer)
                    .with_retry_policy(retry_policy),
            ),
            blob_store,
            max_upload_size_bytes: settings.server.max_upload_size_bytes,
        }
    }
}
