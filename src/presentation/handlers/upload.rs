use std::io;

use axum::Json;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::application::services::UploadError;
use crate::domain::{AssetKind, UploadedAsset};
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Serialize)]
pub struct ImageUploadResponse {
    pub success: bool,
    pub image_path: String,
}

#[derive(Serialize)]
pub struct AudioUploadResponse {
    pub success: bool,
    pub audio_path: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_image_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageUploadResponse>, ApiError> {
    let asset = receive_upload(&state, multipart, AssetKind::Image).await?;

    Ok(Json(ImageUploadResponse {
        success: true,
        image_path: asset.storage_path.to_string(),
    }))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_audio_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AudioUploadResponse>, ApiError> {
    let asset = receive_upload(&state, multipart, AssetKind::Audio).await?;

    Ok(Json(AudioUploadResponse {
        success: true,
        audio_path: asset.storage_path.to_string(),
    }))
}

/// Streams the first multipart field named after `kind` into the blob store.
/// Other fields are skipped. A body that is not multipart counts as a missing field.
async fn receive_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    kind: AssetKind,
) -> Result<UploadedAsset, UploadError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Upload request is not multipart");
        UploadError::MissingField(kind)
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(kind, e))?
    {
        if field.name() != Some(kind.field_name()) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        tracing::debug!(
            filename = ?filename,
            content_type = ?field.content_type(),
            "Receiving upload"
        );

        let stream = field_stream(field);
        return state
            .upload_service
            .upload(kind, filename.as_deref(), stream)
            .await;
    }

    tracing::warn!(field = kind.field_name(), "Upload request without expected field");
    Err(UploadError::MissingField(kind))
}

/// Field body as a byte stream. Hitting the body limit surfaces as
/// `ErrorKind::FileTooLarge`.
pub(super) fn field_stream(field: Field<'_>) -> BoxStream<'_, Result<Bytes, io::Error>> {
    field
        .map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                io::Error::new(io::ErrorKind::FileTooLarge, e)
            } else {
                io::Error::other(e)
            }
        })
        .boxed()
}

pub(super) fn read_error(kind: AssetKind, e: MultipartError) -> UploadError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge(kind)
    } else {
        UploadError::Malformed(e.to_string())
    }
}
