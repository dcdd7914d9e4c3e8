use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::application::ports::{
    BlobStore, BlobStoreError, ReviewEngine, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{
    AssetKind, ReferenceError, ReviewOptions, ReviewResult, StoragePath, TranscriptionResult,
};

use super::retry_policy::RetryPolicy;
use super::review_adapter::{ReviewAdapter, ReviewAdapterError};

/// Per-request lifecycle. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Received,
    Resolving,
    Invoking,
    Succeeded,
    Failed,
}

impl RequestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Resolving => "resolving",
            Self::Invoking => "invoking",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Maps one processing request to one adapter invocation and one classified outcome.
pub struct Orchestrator {
    blob_store: Arc<dyn BlobStore>,
    transcriber: Arc<dyn TranscriptionEngine>,
    review_adapter: ReviewAdapter,
    retry_policy: RetryPolicy,
}

impl Orchestrator {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        transcriber: Arc<dyn TranscriptionEngine>,
        reviewer: Arc<dyn ReviewEngine>,
    ) -> Self {
        let review_adapter = ReviewAdapter::new(Arc::clone(&blob_store), reviewer);
        Self {
            blob_store,
            transcriber,
            review_adapter,
            retry_policy: RetryPolicy::none(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    #[tracing::instrument(skip(self))]
    pub async fn transcribe(
        &self,
        reference: Option<&str>,
    ) -> Result<TranscriptionResult, OrchestratorError> {
        let outcome = self.run_transcription(reference).await;
        record_outcome(AssetKind::Audio, &outcome);
        outcome
    }

    #[tracing::instrument(skip(self, options), fields(task = options.task.as_str()))]
    pub async fn review(
        &self,
        reference: Option<&str>,
        options: ReviewOptions,
    ) -> Result<ReviewResult, OrchestratorError> {
        let outcome = self.run_review(reference, &options).await;
        record_outcome(AssetKind::Image, &outcome);
        outcome
    }

    async fn run_transcription(
        &self,
        reference: Option<&str>,
    ) -> Result<TranscriptionResult, OrchestratorError> {
        trace_phase(RequestPhase::Received, AssetKind::Audio);

        trace_phase(RequestPhase::Resolving, AssetKind::Audio);
        let path = resolve_reference(reference, AssetKind::Audio)?;
        let audio = self.blob_store.get(&path).await.map_err(|e| match e {
            BlobStoreError::NotFound(_) => OrchestratorError::NotFound {
                kind: AssetKind::Audio,
                reference: path.to_string(),
            },
            other => OrchestratorError::Storage(other),
        })?;

        trace_phase(RequestPhase::Invoking, AssetKind::Audio);
        let transcriber = &self.transcriber;
        let audio = audio.as_slice();
        let text = self
            .with_retries(
                AssetKind::Audio,
                move || transcriber.transcribe(audio),
                TranscriptionError::is_retryable,
            )
            .await
            .map_err(|e| OrchestratorError::Provider {
                kind: AssetKind::Audio,
                reason: e.to_string(),
            })?;

        if text.trim().is_empty() {
            return Err(OrchestratorError::EmptyResult(AssetKind::Audio));
        }

        Ok(TranscriptionResult { text })
    }

    async fn run_review(
        &self,
        reference: Option<&str>,
        options: &ReviewOptions,
    ) -> Result<ReviewResult, OrchestratorError> {
        trace_phase(RequestPhase::Received, AssetKind::Image);

        trace_phase(RequestPhase::Resolving, AssetKind::Image);
        let path = resolve_reference(reference, AssetKind::Image)?;

        trace_phase(RequestPhase::Invoking, AssetKind::Image);
        let adapter = &self.review_adapter;
        let path_ref = &path;
        let text = self
            .with_retries(
                AssetKind::Image,
                move || adapter.review(path_ref, options),
                ReviewAdapterError::is_retryable,
            )
            .await
            .map_err(|e| match e {
                ReviewAdapterError::NotFound(reference) => OrchestratorError::NotFound {
                    kind: AssetKind::Image,
                    reference,
                },
                ReviewAdapterError::Storage(source) => OrchestratorError::Storage(source),
                ReviewAdapterError::Provider(source) => OrchestratorError::Provider {
                    kind: AssetKind::Image,
                    reason: source.to_string(),
                },
            })?;

        if text.trim().is_empty() {
            return Err(OrchestratorError::EmptyResult(AssetKind::Image));
        }

        Ok(ReviewResult { text })
    }

    async fn with_retries<T, E, F, Fut>(
        &self,
        kind: AssetKind,
        mut call: F,
        retryable: fn(&E) -> bool,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut attempt: u32 = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retry_policy.max_attempts && retryable(&e) => {
                    let delay = self.retry_policy.backoff(attempt);
                    tracing::warn!(
                        kind = %kind,
                        attempt,
                        max_attempts = self.retry_policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Provider call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn resolve_reference(
    reference: Option<&str>,
    kind: AssetKind,
) -> Result<StoragePath, OrchestratorError> {
    let raw = reference.ok_or(OrchestratorError::MissingReference(kind))?;
    StoragePath::parse(raw, kind).map_err(|e| match e {
        ReferenceError::Missing => OrchestratorError::MissingReference(kind),
        ReferenceError::Unrecognised { reference, .. } => {
            OrchestratorError::NotFound { kind, reference }
        }
    })
}

fn trace_phase(phase: RequestPhase, kind: AssetKind) {
    tracing::debug!(phase = phase.as_str(), kind = %kind, "Request phase");
}

fn record_outcome<T>(kind: AssetKind, outcome: &Result<T, OrchestratorError>) {
    match outcome {
        Ok(_) => trace_phase(RequestPhase::Succeeded, kind),
        Err(e @ (OrchestratorError::Provider { .. } | OrchestratorError::Storage(_))) => {
            tracing::error!(phase = RequestPhase::Failed.as_str(), kind = %kind, error = %e, "Request failed");
        }
        Err(e) => {
            tracing::warn!(phase = RequestPhase::Failed.as_str(), kind = %kind, error = %e, "Request failed");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("no {0} reference provided")]
    MissingReference(AssetKind),
    #[error("{kind} reference {reference:?} does not resolve to a stored asset")]
    NotFound { kind: AssetKind, reference: String },
    #[error("{kind} provider failed: {reason}")]
    Provider { kind: AssetKind, reason: String },
    #[error("{0} provider returned no usable output")]
    EmptyResult(AssetKind),
    #[error("storage: {0}")]
    Storage(BlobStoreError),
}

impl OrchestratorError {
    /// Missing, malformed or stale references.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::MissingReference(_) | Self::NotFound { .. })
    }
}
