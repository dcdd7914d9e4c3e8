use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ReviewEngine, ReviewError};
use crate::domain::ReviewOptions;
use crate::infrastructure::observability::sanitize_prompt;

use super::review_prompt::build_review_prompt;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Menu review through the Gemini `generateContent` API with the photo inlined.
pub struct GeminiMenuReviewer {
    client: Client,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl GeminiMenuReviewer {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: u32,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewError::Configuration(format!("http client: {e}")))?;
        let base_url = base_url.unwrap_or_else(|| GEMINI_BASE_URL.to_string());
        let model = model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            api_key,
            max_tokens,
            temperature,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl ReviewEngine for GeminiMenuReviewer {
    #[tracing::instrument(skip(self, image, options), fields(bytes = image.len()))]
    async fn review(
        &self,
        image: &[u8],
        mime_type: &str,
        options: &ReviewOptions,
    ) -> Result<String, ReviewError> {
        let prompt = build_review_prompt(options);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: general_purpose::STANDARD.encode(image),
                        },
                    },
                    Part::Text { text: &prompt },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        tracing::debug!(prompt = %sanitize_prompt(&prompt), "Sending menu to Gemini");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ReviewError::ApiRequestFailed(format!("request: {e}")))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ReviewError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ReviewError::ApiRequestFailed(format!(
                "status {status}: {text}"
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ReviewError::InvalidResponse(format!("parse response: {e}")))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        tracing::info!(chars = text.len(), "Gemini review completed");

        Ok(text.trim().to_string())
    }
}
