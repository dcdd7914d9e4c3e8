use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutMode, PutPayload};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::{AssetId, AssetKind, SanitizedFilename, StoragePath, UploadedAsset};

/// [`BlobStore`] over any `object_store` backend.
///
/// Uploads are buffered in memory and committed with a single create-exclusive
/// put, so an aborted upload leaves nothing behind and an existing object is
/// never replaced.
pub struct ObjectBlobStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectBlobStore {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    pub fn local(base_path: PathBuf) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(&base_path).map_err(BlobStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;
        Ok(Self::new(Arc::new(fs)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }
}

#[async_trait::async_trait]
impl BlobStore for ObjectBlobStore {
    async fn put(
        &self,
        kind: AssetKind,
        original_name: &str,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<UploadedAsset, BlobStoreError> {
        let filename = SanitizedFilename::parse(original_name)?;
        let created_at = Utc::now();
        let id = AssetId::at(created_at);
        let path = StoragePath::new(kind, &id, &filename);

        let mut parts: Vec<Bytes> = Vec::new();
        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            total_bytes += bytes.len() as u64;
            parts.push(bytes);
        }

        let payload: PutPayload = parts.into_iter().collect();
        let store_path = StorePath::from(path.as_str());

        match self
            .inner
            .put_opts(&store_path, payload, PutMode::Create.into())
            .await
        {
            Ok(_) => {}
            Err(object_store::Error::AlreadyExists { .. }) => {
                return Err(BlobStoreError::AlreadyExists(path.to_string()));
            }
            Err(e) => return Err(BlobStoreError::UploadFailed(e.to_string())),
        }

        tracing::debug!(path = %path, bytes = total_bytes, "Blob written");

        Ok(UploadedAsset {
            id,
            kind,
            original_name: original_name.to_string(),
            storage_path: path,
            size_bytes: total_bytes,
            created_at,
        })
    }

    async fn get(&self, path: &StoragePath) -> Result<Vec<u8>, BlobStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = match self.inner.get(&store_path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(BlobStoreError::NotFound(path.to_string()));
            }
            Err(e) => return Err(BlobStoreError::DownloadFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), BlobStoreError> {
        let store_path = StorePath::from(path.as_str());
        match self.inner.delete(&store_path).await {
            Ok(()) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => {
                Err(BlobStoreError::NotFound(path.to_string()))
            }
            Err(e) => Err(BlobStoreError::DeleteFailed(e.to_string())),
        }
    }
}
