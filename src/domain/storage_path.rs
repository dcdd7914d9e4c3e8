use std::fmt;

use super::asset_id::AssetId;
use super::asset_kind::AssetKind;
use super::sanitized_filename::SanitizedFilename;

/// Opaque asset reference handed back to clients, e.g. `uploads/<id>_menu.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath {
    kind: AssetKind,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("no reference provided")]
    Missing,
    #[error("{reference:?} is not a valid {kind} reference")]
    Unrecognised { kind: AssetKind, reference: String },
}

impl StoragePath {
    pub fn new(kind: AssetKind, id: &AssetId, filename: &SanitizedFilename) -> Self {
        Self {
            kind,
            value: format!("{}/{}_{}", kind.namespace(), id, filename),
        }
    }

    /// Parses a reference previously issued for `kind`.
    ///
    /// References into another namespace, nested paths and names that would not
    /// survive sanitization are rejected.
    pub fn parse(raw: &str, kind: AssetKind) -> Result<Self, ReferenceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Missing);
        }

        let unrecognised = || ReferenceError::Unrecognised {
            kind,
            reference: raw.to_string(),
        };

        let relative = trimmed.strip_prefix("./").unwrap_or(trimmed);
        let (namespace, name) = relative.split_once('/').ok_or_else(unrecognised)?;
        if namespace != kind.namespace() {
            return Err(unrecognised());
        }

        Self::in_namespace(kind, name).map_err(|_| unrecognised())
    }

    /// Builds a reference from a bare file name inside the namespace of `kind`.
    pub fn in_namespace(kind: AssetKind, name: &str) -> Result<Self, ReferenceError> {
        let unrecognised = || ReferenceError::Unrecognised {
            kind,
            reference: name.to_string(),
        };

        let sanitized = SanitizedFilename::parse(name).map_err(|_| unrecognised())?;
        if sanitized.as_str() != name {
            return Err(unrecognised());
        }

        Ok(Self {
            kind,
            value: format!("{}/{}", kind.namespace(), name),
        })
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn file_name(&self) -> &str {
        self.value
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.value)
    }

    /// MIME type guessed from the file extension.
    pub fn content_type(&self) -> &'static str {
        let extension = self
            .file_name()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            Some("heic") => "image/heic",
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("m4a") => "audio/mp4",
            Some("ogg") => "audio/ogg",
            Some("webm") => "audio/webm",
            Some("flac") => "audio/flac",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
