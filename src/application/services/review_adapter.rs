use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError, ReviewEngine, ReviewError};
use crate::domain::{ReviewOptions, StoragePath};

/// Resolves an image reference and hands the bytes, with the caller's options, to
/// the review engine.
pub struct ReviewAdapter {
    blob_store: Arc<dyn BlobStore>,
    engine: Arc<dyn ReviewEngine>,
}

impl ReviewAdapter {
    pub fn new(blob_store: Arc<dyn BlobStore>, engine: Arc<dyn ReviewEngine>) -> Self {
        Self { blob_store, engine }
    }

    pub async fn review(
        &self,
        image_ref: &StoragePath,
        options: &ReviewOptions,
    ) -> Result<String, ReviewAdapterError> {
        let image = self.blob_store.get(image_ref).await.map_err(|e| match e {
            BlobStoreError::NotFound(_) => ReviewAdapterError::NotFound(image_ref.to_string()),
            other => ReviewAdapterError::Storage(other),
        })?;

        tracing::debug!(
            image_ref = %image_ref,
            bytes = image.len(),
            task = options.task.as_str(),
            language = %options.language,
            "Invoking review engine"
        );

        self.engine
            .review(&image, image_ref.content_type(), options)
            .await
            .map_err(ReviewAdapterError::Provider)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewAdapterError {
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("storage: {0}")]
    Storage(BlobStoreError),
    #[error("provider: {0}")]
    Provider(ReviewError),
}

impl ReviewAdapterError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_retryable())
    }
}
