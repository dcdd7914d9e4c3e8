mod gemini_menu_reviewer;
mod mock_review_engine;
mod openai_vision_reviewer;
mod review_engine_factory;
mod review_prompt;

pub use gemini_menu_reviewer::{DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL, GeminiMenuReviewer};
pub use mock_review_engine::MockReviewEngine;
pub use openai_vision_reviewer::OpenAiVisionReviewer;
pub use review_engine_factory::ReviewEngineFactory;
pub use review_prompt::build_review_prompt;
