use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};

use crate::domain::{AssetKind, DEFAULT_LANGUAGE, ReviewOptions, ReviewTask, UploadedAsset};
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::upload::{field_stream, read_error};

/// Filename used for one-shot reviews when the client sends none.
const FALLBACK_IMAGE_NAME: &str = "menu.jpg";

#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    pub image_path: Option<String>,
    pub task: Option<String>,
    pub language: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub allergies: Option<String>,
    pub culture: Option<String>,
}

impl ReviewRequest {
    pub fn options(&self, default_task: ReviewTask) -> ReviewOptions {
        ReviewOptions {
            task: self
                .task
                .as_deref()
                .map(ReviewTask::from)
                .unwrap_or(default_task),
            language: self
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            dietary_restrictions: self.dietary_restrictions.clone(),
            allergies: self.allergies.clone(),
            culture: self.culture.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Serialize)]
pub struct SimpleMenuResponse {
    pub simple_menu: String,
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
}

#[derive(Serialize)]
pub struct ReviewUploadResponse {
    pub review: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn summarize_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = review_by_reference(&state, payload, ReviewTask::Summarize).await?;
    Ok(Json(SummaryResponse { summary }))
}

#[tracing::instrument(skip(state, payload))]
pub async fn simple_menu_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<SimpleMenuResponse>, ApiError> {
    let simple_menu = review_by_reference(&state, payload, ReviewTask::SimpleMenu).await?;
    Ok(Json(SimpleMenuResponse { simple_menu }))
}

#[tracing::instrument(skip(state, payload))]
pub async fn recommendation_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let recommendation =
        review_by_reference(&state, payload, ReviewTask::Recommendation).await?;
    Ok(Json(RecommendationResponse { recommendation }))
}

async fn review_by_reference(
    state: &AppState,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
    default_task: ReviewTask,
) -> Result<String, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable review request body");
            ReviewRequest::default()
        }
    };

    let options = request.options(default_task);
    let result = state
        .orchestrator
        .review(request.image_path.as_deref(), options)
        .await?;

    Ok(result.text)
}

/// Upload and review in one call. The stored photo is deleted once the review
/// finishes, whatever the outcome.
#[tracing::instrument(skip(state, multipart))]
pub async fn review_upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReviewUploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Review request is not multipart");
        ApiError::bad_request("No image file provided")
    })?;

    let mut asset: Option<UploadedAsset> = None;
    let form = read_review_form(&state, &mut multipart, &mut asset).await;

    let outcome = match (form, &asset) {
        (Err(e), _) => Err(e),
        (Ok(_), None) => Err(ApiError::bad_request("No image file provided")),
        (Ok(request), Some(asset)) => state
            .orchestrator
            .review(
                Some(asset.storage_path.as_str()),
                request.options(ReviewTask::Summarize),
            )
            .await
            .map(|result| ReviewUploadResponse {
                review: result.text,
            })
            .map_err(ApiError::from),
    };

    if let Some(asset) = asset {
        if let Err(e) = state.blob_store.delete(&asset.storage_path).await {
            tracing::warn!(
                storage_path = %asset.storage_path,
                error = %e,
                "Failed to remove one-shot review image"
            );
        }
    }

    outcome.map(Json)
}

async fn read_review_form(
    state: &AppState,
    multipart: &mut Multipart,
    asset: &mut Option<UploadedAsset>,
) -> Result<ReviewRequest, ApiError> {
    let mut request = ReviewRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(AssetKind::Image, e))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == AssetKind::Image.field_name() {
            if asset.is_some() {
                continue;
            }
            let filename = field
                .file_name()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(FALLBACK_IMAGE_NAME)
                .to_string();
            let stream = field_stream(field);
            let stored = state
                .upload_service
                .upload(AssetKind::Image, Some(&filename), stream)
                .await?;
            *asset = Some(stored);
            continue;
        }

        let slot = match name.as_str() {
            "task" => &mut request.task,
            "language" => &mut request.language,
            "dietary_restrictions" => &mut request.dietary_restrictions,
            "allergies" => &mut request.allergies,
            "culture" => &mut request.culture,
            _ => continue,
        };

        let value = field
            .text()
            .await
            .map_err(|e| read_error(AssetKind::Image, e))?;
        if !value.trim().is_empty() {
            *slot = Some(value);
        }
    }

    Ok(request)
}
