use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::google_speech_engine::join_segments;

/// Canned recogniser for local runs and tests.
pub struct MockTranscriptionEngine {
    segments: Vec<String>,
    failure: Option<String>,
}

impl MockTranscriptionEngine {
    pub fn with_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    /// Recognises nothing, as for silent audio.
    pub fn silent() -> Self {
        Self::with_segments(Vec::<String>::new())
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            segments: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        match &self.failure {
            Some(reason) => Err(TranscriptionError::ApiRequestFailed(reason.clone())),
            None => Ok(join_segments(&self.segments)),
        }
    }
}
