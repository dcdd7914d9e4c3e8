use async_trait::async_trait;

/// Speech-to-text provider.
///
/// A successful call may yield an empty string when nothing was recognised;
/// that is not an error at this boundary.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TranscriptionError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ApiRequestFailed(_) | Self::RateLimited)
    }
}
