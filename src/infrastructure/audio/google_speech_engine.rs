use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::audio_probe::ensure_linear16_mono;

pub const GOOGLE_SPEECH_BASE_URL: &str = "https://speech.googleapis.com";

/// Google Cloud Speech-to-Text v1 `speech:recognize`, one synchronous call per request.
pub struct GoogleSpeechEngine {
    client: Client,
    endpoint: String,
    api_key: String,
    language_code: String,
    sample_rate_hertz: u32,
}

impl GoogleSpeechEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        language_code: String,
        sample_rate_hertz: u32,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::Configuration(format!("http client: {}", e)))?;
        let base_url = base_url.unwrap_or_else(|| GOOGLE_SPEECH_BASE_URL.to_string());

        Ok(Self {
            client,
            endpoint: format!("{}/v1/speech:recognize", base_url.trim_end_matches('/')),
            api_key,
            language_code,
            sample_rate_hertz,
        })
    }
}

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

/// Joins recognised segments with single spaces, dropping blank ones.
pub fn join_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl TranscriptionEngine for GoogleSpeechEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        ensure_linear16_mono(audio_data, self.sample_rate_hertz)?;

        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: self.sample_rate_hertz,
                language_code: &self.language_code,
            },
            audio: RecognitionAudio {
                content: general_purpose::STANDARD.encode(audio_data),
            },
        };

        tracing::debug!(
            bytes = audio_data.len(),
            language_code = %self.language_code,
            "Sending audio to Google Speech-to-Text"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        let transcript = join_segments(result.results.iter().filter_map(|r| {
            r.alternatives
                .first()
                .map(|alternative| alternative.transcript.as_str())
        }));

        tracing::info!(
            segments = result.results.len(),
            chars = transcript.len(),
            "Google transcription completed"
        );

        Ok(transcript)
    }
}
