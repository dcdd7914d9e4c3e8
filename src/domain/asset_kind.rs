use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKind {
    /// Top-level storage namespace. Image and audio namespaces never overlap.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Image => "uploads",
            Self::Audio => "audio_uploads",
        }
    }

    /// Multipart field that carries this kind of upload.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.field_name()
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
