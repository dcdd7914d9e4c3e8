use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::google_speech_engine::GoogleSpeechEngine;
use super::mock_transcription_engine::MockTranscriptionEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let timeout = Duration::from_secs(settings.timeout_secs);

        match settings.provider {
            TranscriptionProviderSetting::Google => {
                let key = require_api_key(settings, "Google Speech-to-Text")?;
                let engine = GoogleSpeechEngine::new(
                    key,
                    settings.base_url.clone(),
                    settings.language_code.clone(),
                    settings.sample_rate_hertz,
                    timeout,
                )?;
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::OpenAi => {
                let key = require_api_key(settings, "OpenAI Whisper")?;
                let language = settings
                    .language_code
                    .split('-')
                    .next()
                    .map(str::to_string);
                let engine = OpenAiWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    settings.model.clone(),
                    language,
                    timeout,
                )?;
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Mock => Ok(Arc::new(
                MockTranscriptionEngine::with_segments(["Mock", "transcription"]),
            )),
        }
    }
}

fn require_api_key(
    settings: &TranscriptionSettings,
    provider: &str,
) -> Result<String, TranscriptionError> {
    settings
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| TranscriptionError::Configuration(format!("API key required for {}", provider)))
}
