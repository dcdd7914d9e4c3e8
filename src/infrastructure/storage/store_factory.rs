use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_blob_store::ObjectBlobStore;

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                tracing::info!(path = %path.display(), "Using local blob store");
                Ok(Arc::new(ObjectBlobStore::local(path)?))
            }
            StorageProviderSetting::Memory => {
                tracing::warn!("Using in-memory blob store; uploads are lost on restart");
                Ok(Arc::new(ObjectBlobStore::in_memory()))
            }
        }
    }
}
