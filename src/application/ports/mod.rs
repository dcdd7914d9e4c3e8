mod blob_store;
mod review_engine;
mod transcription_engine;

pub use blob_store::{BlobStore, BlobStoreError};
pub use review_engine::{ReviewEngine, ReviewError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
