use chrono::{DateTime, Utc};

use super::asset_id::AssetId;
use super::asset_kind::AssetKind;
use super::storage_path::StoragePath;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAsset {
    pub id: AssetId,
    pub kind: AssetKind,
    pub original_name: String,
    pub storage_path: StoragePath,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}
