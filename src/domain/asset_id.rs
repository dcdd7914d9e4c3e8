use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Upload identifier: a zero-padded millisecond timestamp followed by a random token.
///
/// The timestamp keeps ids sortable by upload time, the token makes two ids minted
/// in the same millisecond distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self(format!(
            "{:013}-{}",
            timestamp.timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
