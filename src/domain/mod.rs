mod asset_id;
mod asset_kind;
mod inference_result;
mod review_options;
mod sanitized_filename;
mod storage_path;
mod uploaded_asset;

pub use asset_id::AssetId;
pub use asset_kind::AssetKind;
pub use inference_result::{ReviewResult, TranscriptionResult};
pub use review_options::{DEFAULT_LANGUAGE, ReviewOptions, ReviewTask};
pub use sanitized_filename::{FilenameError, SanitizedFilename};
pub use storage_path::{ReferenceError, StoragePath};
pub use uploaded_asset::UploadedAsset;
