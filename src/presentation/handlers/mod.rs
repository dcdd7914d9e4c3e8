mod assets;
mod error;
mod health;
mod review;
mod transcribe;
mod upload;

pub use assets::{serve_audio_handler, serve_image_handler};
pub use error::{ApiError, ErrorResponse};
pub use health::{health_handler, root_handler};
pub use review::{
    ReviewRequest, recommendation_handler, review_upload_handler, simple_menu_handler,
    summarize_handler,
};
pub use transcribe::{TranscribeRequest, transcribe_handler};
pub use upload::{upload_audio_handler, upload_image_handler};
