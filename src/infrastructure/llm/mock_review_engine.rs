use std::sync::Mutex;

use crate::application::ports::{ReviewEngine, ReviewError};
use crate::domain::ReviewOptions;

/// Canned reviewer for local runs and tests. Remembers the last options it saw.
pub struct MockReviewEngine {
    response: Result<String, String>,
    last_options: Mutex<Option<ReviewOptions>>,
}

impl MockReviewEngine {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            last_options: Mutex::new(None),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
            last_options: Mutex::new(None),
        }
    }

    pub fn last_options(&self) -> Option<ReviewOptions> {
        self.last_options
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ReviewEngine for MockReviewEngine {
    async fn review(
        &self,
        _image: &[u8],
        _mime_type: &str,
        options: &ReviewOptions,
    ) -> Result<String, ReviewError> {
        if let Ok(mut guard) = self.last_options.lock() {
            *guard = Some(options.clone());
        }

        self.response
            .clone()
            .map_err(ReviewError::ApiRequestFailed)
    }
}
