use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{OrchestratorError, UploadError};
use crate::domain::AssetKind;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Caller-facing failure. Messages never carry provider or storage internals.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::MissingField(kind) => {
                Self::bad_request(format!("No {kind} part in the request"))
            }
            UploadError::EmptyFilename(kind) => {
                Self::bad_request(format!("No {kind} selected for uploading"))
            }
            UploadError::InvalidFilename { kind, .. } => {
                Self::bad_request(format!("Invalid {kind} filename"))
            }
            UploadError::TooLarge(kind) => Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("The {kind} exceeds the upload size limit"),
            ),
            UploadError::Malformed(reason) => {
                tracing::warn!(reason = %reason, "Unreadable upload");
                Self::bad_request("Failed to read upload")
            }
            UploadError::Storage { kind, source } => {
                tracing::error!(kind = %kind, error = %source, "Failed to store upload");
                Self::internal(format!("Failed to process {kind}"))
            }
        }
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(e: OrchestratorError) -> Self {
        match e {
            OrchestratorError::MissingReference(AssetKind::Image) => {
                Self::bad_request("No image path provided")
            }
            OrchestratorError::MissingReference(kind) | OrchestratorError::NotFound { kind, .. } => {
                Self::bad_request(format!("Invalid or missing {kind} path"))
            }
            OrchestratorError::Provider {
                kind: AssetKind::Audio,
                ..
            }
            | OrchestratorError::EmptyResult(AssetKind::Audio) => {
                Self::internal("Failed to transcribe audio")
            }
            OrchestratorError::Provider {
                kind: AssetKind::Image,
                ..
            }
            | OrchestratorError::EmptyResult(AssetKind::Image) => {
                Self::internal("Failed to generate review")
            }
            OrchestratorError::Storage(_) => Self::internal("Internal server error"),
        }
    }
}
