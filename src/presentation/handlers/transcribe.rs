use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct TranscribeRequest {
    pub audio_path: Option<String>,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcription: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable transcribe request body");
            TranscribeRequest::default()
        }
    };

    let result = state
        .orchestrator
        .transcribe(request.audio_path.as_deref())
        .await?;

    Ok(Json(TranscribeResponse {
        transcription: result.text,
    }))
}
