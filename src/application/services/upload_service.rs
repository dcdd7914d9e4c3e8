use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::{AssetKind, FilenameError, UploadedAsset};

/// Validates incoming uploads and writes them through the blob store.
///
/// Uploading never triggers processing; callers get a reference back and pass it
/// to the orchestrator in a separate request.
pub struct UploadService {
    blob_store: Arc<dyn BlobStore>,
}

impl UploadService {
    pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
        Self { blob_store }
    }

    #[tracing::instrument(skip(self, stream), fields(kind = %kind))]
    pub async fn upload(
        &self,
        kind: AssetKind,
        filename: Option<&str>,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<UploadedAsset, UploadError> {
        let original_name = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::EmptyFilename(kind))?;

        let asset = self
            .blob_store
            .put(kind, original_name, stream)
            .await
            .map_err(|e| match e {
                BlobStoreError::InvalidFilename(source) => {
                    UploadError::InvalidFilename { kind, source }
                }
                BlobStoreError::Io(source) if source.kind() == io::ErrorKind::FileTooLarge => {
                    UploadError::TooLarge(kind)
                }
                BlobStoreError::Io(source) => UploadError::Malformed(source.to_string()),
                other => UploadError::Storage { kind, source: other },
            })?;

        tracing::info!(
            asset_id = %asset.id,
            storage_path = %asset.storage_path,
            size_bytes = asset.size_bytes,
            "Upload stored"
        );

        Ok(asset)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no {0} part in the request")]
    MissingField(AssetKind),
    #[error("no {0} selected for uploading")]
    EmptyFilename(AssetKind),
    #[error("invalid {kind} filename: {source}")]
    InvalidFilename {
        kind: AssetKind,
        #[source]
        source: FilenameError,
    },
    #[error("{0} exceeds the upload size limit")]
    TooLarge(AssetKind),
    #[error("malformed upload: {0}")]
    Malformed(String),
    #[error("failed to store {kind}: {source}")]
    Storage {
        kind: AssetKind,
        #[source]
        source: BlobStoreError,
    },
}
