use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::{AssetKind, FilenameError, StoragePath, UploadedAsset};

/// Write-once storage for uploaded binaries, partitioned by [`AssetKind`].
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Sanitizes `original_name`, mints a unique path and persists the stream.
    /// Never overwrites an existing asset.
    async fn put(
        &self,
        kind: AssetKind,
        original_name: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<UploadedAsset, BlobStoreError>;

    async fn get(&self, path: &StoragePath) -> Result<Vec<u8>, BlobStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("invalid filename: {0}")]
    InvalidFilename(#[from] FilenameError),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
