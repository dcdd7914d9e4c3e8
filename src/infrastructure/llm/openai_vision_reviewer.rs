use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::ports::{ReviewEngine, ReviewError};
use crate::domain::ReviewOptions;
use crate::infrastructure::observability::sanitize_prompt;

use super::review_prompt::build_review_prompt;

pub const OPENAI_CHAT_BASE_URL: &str = "https://api.openai.com/v1";

/// Menu review through an OpenAI-compatible `chat/completions` endpoint with an
/// `image_url` content part.
pub struct OpenAiVisionReviewer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiVisionReviewer {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewError::Configuration(format!("http client: {e}")))?;
        let base_url = base_url.unwrap_or_else(|| OPENAI_CHAT_BASE_URL.to_string());

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model,
            api_key,
            max_tokens,
            temperature,
        })
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl ReviewEngine for OpenAiVisionReviewer {
    #[tracing::instrument(skip(self, image, options), fields(model = %self.model, bytes = image.len()))]
    async fn review(
        &self,
        image: &[u8],
        mime_type: &str,
        options: &ReviewOptions,
    ) -> Result<String, ReviewError> {
        let prompt = build_review_prompt(options);
        let data_uri = format!(
            "data:{mime_type};base64,{}",
            general_purpose::STANDARD.encode(image)
        );

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image_url",
                            "image_url": { "url": data_uri }
                        },
                        {
                            "type": "text",
                            "text": prompt
                        }
                    ]
                }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "stream": false
        });

        tracing::debug!(prompt = %sanitize_prompt(&prompt), "Sending menu to vision model");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
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

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| ReviewError::ApiRequestFailed(format!("read body: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse chat completion"
            );
            ReviewError::InvalidResponse(format!("parse response: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        tracing::info!(chars = content.len(), "Vision review completed");

        Ok(content.trim().to_string())
    }
}
