use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::application::ports::BlobStoreError;
use crate::domain::{AssetKind, StoragePath};
use crate::presentation::state::AppState;

use super::error::ApiError;

pub async fn serve_image_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    serve_asset(&state, AssetKind::Image, &name).await
}

pub async fn serve_audio_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    serve_asset(&state, AssetKind::Audio, &name).await
}

async fn serve_asset(
    state: &AppState,
    kind: AssetKind,
    name: &str,
) -> Result<Response, ApiError> {
    let path = StoragePath::in_namespace(kind, name).map_err(|e| {
        tracing::debug!(name = %name, error = %e, "Rejected asset name");
        ApiError::not_found("File not found")
    })?;

    let data = state.blob_store.get(&path).await.map_err(|e| match e {
        BlobStoreError::NotFound(_) => ApiError::not_found("File not found"),
        other => {
            tracing::error!(storage_path = %path, error = %other, "Failed to read asset");
            ApiError::internal("Internal server error")
        }
    })?;

    Ok(([(header::CONTENT_TYPE, path.content_type())], data).into_response())
}
