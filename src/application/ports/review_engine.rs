use async_trait::async_trait;

use crate::domain::ReviewOptions;

/// Vision/LLM provider that turns a menu photo into free text.
#[async_trait]
pub trait ReviewEngine: Send + Sync {
    async fn review(
        &self,
        image: &[u8],
        mime_type: &str,
        options: &ReviewOptions,
    ) -> Result<String, ReviewError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ReviewError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ApiRequestFailed(_) | Self::RateLimited)
    }
}
