use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ReviewEngine, ReviewError};
use crate::presentation::config::{ReviewProviderSetting, ReviewSettings};

use super::gemini_menu_reviewer::GeminiMenuReviewer;
use super::mock_review_engine::MockReviewEngine;
use super::openai_vision_reviewer::OpenAiVisionReviewer;

const DEFAULT_OPENAI_VISION_MODEL: &str = "gpt-4o-mini";

pub struct ReviewEngineFactory;

impl ReviewEngineFactory {
    pub fn create(settings: &ReviewSettings) -> Result<Arc<dyn ReviewEngine>, ReviewError> {
        let timeout = Duration::from_secs(settings.timeout_secs);

        match settings.provider {
            ReviewProviderSetting::Gemini => {
                let key = require_api_key(settings, "Gemini")?;
                let engine = GeminiMenuReviewer::new(
                    key,
                    settings.base_url.clone(),
                    settings.model.clone(),
                    settings.max_tokens,
                    settings.temperature,
                    timeout,
                )?;
                Ok(Arc::new(engine))
            }
            ReviewProviderSetting::OpenAi => {
                let key = require_api_key(settings, "OpenAI vision")?;
                let model = settings
                    .model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_OPENAI_VISION_MODEL.to_string());
                let engine = OpenAiVisionReviewer::new(
                    key,
                    settings.base_url.clone(),
                    model,
                    settings.max_tokens,
                    settings.temperature,
                    timeout,
                )?;
                Ok(Arc::new(engine))
            }
            ReviewProviderSetting::Mock => Ok(Arc::new(MockReviewEngine::returning(
                "Mock review: the menu looks delicious.",
            ))),
        }
    }
}

fn require_api_key(settings: &ReviewSettings, provider: &str) -> Result<String, ReviewError> {
    settings
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ReviewError::Configuration(format!("API key required for {provider}")))
}
