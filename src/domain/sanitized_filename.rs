use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

/// A client-supplied filename reduced to `[A-Za-z0-9_.-]`, with no path components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFilename(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("filename is empty")]
    Empty,
    #[error("filename {0:?} contains no usable characters")]
    NothingLeft(String),
}

impl SanitizedFilename {
    pub fn parse(raw: &str) -> Result<Self, FilenameError> {
        if raw.trim().is_empty() {
            return Err(FilenameError::Empty);
        }

        let ascii: String = raw.nfkd().filter(char::is_ascii).collect();
        let without_separators = ascii.replace(['/', '\\'], " ");
        let joined = without_separators
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        let safe = UNSAFE_CHARS.replace_all(&joined, "");
        let trimmed = safe.trim_matches(|c| c == '.' || c == '_');

        if trimmed.is_empty() {
            return Err(FilenameError::NothingLeft(raw.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> Option<&str> {
        self.0
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

impl fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
