use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use menuscribe::application::ports::{
    BlobStore, ReviewEngine, TranscriptionEngine, TranscriptionError,
};
use menuscribe::application::services::{Orchestrator, OrchestratorError, RetryPolicy};
use menuscribe::domain::{AssetKind, ReviewOptions, ReviewTask, StoragePath};
use menuscribe::infrastructure::audio::MockTranscriptionEngine;
use menuscribe::infrastructure::llm::MockReviewEngine;
use menuscribe::infrastructure::storage::ObjectBlobStore;

use crate::helpers::{byte_stream, fake_jpeg, silent_wav};

/// Fails with a rate limit a fixed number of times, then succeeds.
struct FlakyTranscriber {
    failures_left: AtomicU32,
    calls: AtomicU32,
}

impl FlakyTranscriber {
    fn new(failures: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for FlakyTranscriber {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(TranscriptionError::RateLimited);
        }
        Ok("table for two".to_string())
    }
}

struct UnsupportedTranscriber {
    calls: AtomicU32,
}

#[async_trait]
impl TranscriptionEngine for UnsupportedTranscriber {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TranscriptionError::UnsupportedFormat("mp3".to_string()))
    }
}

async fn store_with(kind: AssetKind, name: &str, data: &[u8]) -> (Arc<dyn BlobStore>, StoragePath) {
    let store: Arc<dyn BlobStore> = Arc::new(ObjectBlobStore::in_memory());
    let asset = store.put(kind, name, byte_stream(data)).await.unwrap();
    (store, asset.storage_path)
}

fn orchestrator(
    store: Arc<dyn BlobStore>,
    transcriber: Arc<dyn TranscriptionEngine>,
    reviewer: Arc<dyn ReviewEngine>,
) -> Orchestrator {
    Orchestrator::new(store, transcriber, reviewer)
}

fn fast_retries(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(5))
}

#[tokio::test]
async fn given_recognised_segments_when_transcribing_then_returns_joined_text() {
    let (store, path) = store_with(AssetKind::Audio, "order.wav", &silent_wav(1, 16_000)).await;
    let transcriber = Arc::new(MockTranscriptionEngine::with_segments(["I'd like", "the soup"]));
    let sut = orchestrator(store, transcriber, Arc::new(MockReviewEngine::returning("unused")));

    let result = sut.transcribe(Some(path.as_str())).await.unwrap();

    assert_eq!(result.text, "I'd like the soup");
}

#[tokio::test]
async fn given_silent_audio_when_transcribing_then_returns_empty_result() {
    let (store, path) = store_with(AssetKind::Audio, "silence.wav", &silent_wav(3, 16_000)).await;
    let sut = orchestrator(
        store,
        Arc::new(MockTranscriptionEngine::silent()),
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut.transcribe(Some(path.as_str())).await;

    assert!(matches!(result, Err(OrchestratorError::EmptyResult(AssetKind::Audio))));
}

#[tokio::test]
async fn given_no_reference_when_transcribing_then_returns_missing_reference() {
    let sut = orchestrator(
        Arc::new(ObjectBlobStore::in_memory()),
        Arc::new(MockTranscriptionEngine::with_segments(["hi"])),
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut.transcribe(None).await;

    assert!(matches!(result, Err(OrchestratorError::MissingReference(AssetKind::Audio))));
    assert!(result.unwrap_err().is_invalid_reference());
}

#[tokio::test]
async fn given_reference_never_issued_when_transcribing_then_returns_not_found() {
    let sut = orchestrator(
        Arc::new(ObjectBlobStore::in_memory()),
        Arc::new(MockTranscriptionEngine::with_segments(["hi"])),
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut
        .transcribe(Some("audio_uploads/0000000000000-deadbeef_missing.wav"))
        .await;

    assert!(matches!(
        result,
        Err(OrchestratorError::NotFound {
            kind: AssetKind::Audio,
            ..
        })
    ));
}

#[tokio::test]
async fn given_image_reference_when_transcribing_then_returns_not_found() {
    let (store, path) = store_with(AssetKind::Image, "menu.jpg", &fake_jpeg()).await;
    let sut = orchestrator(
        store,
        Arc::new(MockTranscriptionEngine::with_segments(["hi"])),
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut.transcribe(Some(path.as_str())).await;

    assert!(matches!(result, Err(OrchestratorError::NotFound { .. })));
}

#[tokio::test]
async fn given_failing_provider_when_transcribing_then_returns_provider_error() {
    let (store, path) = store_with(AssetKind::Audio, "order.wav", &silent_wav(1, 16_000)).await;
    let sut = orchestrator(
        store,
        Arc::new(MockTranscriptionEngine::failing("quota exceeded")),
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut.transcribe(Some(path.as_str())).await;

    match result {
        Err(OrchestratorError::Provider { kind, reason }) => {
            assert_eq!(kind, AssetKind::Audio);
            assert!(reason.contains("quota exceeded"));
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn given_rate_limited_provider_and_retries_when_transcribing_then_eventually_succeeds() {
    let (store, path) = store_with(AssetKind::Audio, "order.wav", &silent_wav(1, 16_000)).await;
    let transcriber = Arc::new(FlakyTranscriber::new(2));
    let sut = orchestrator(
        store,
        Arc::clone(&transcriber) as Arc<dyn TranscriptionEngine>,
        Arc::new(MockReviewEngine::returning("unused")),
    )
    .with_retry_policy(fast_retries(3));

    let result = sut.transcribe(Some(path.as_str())).await.unwrap();

    assert_eq!(result.text, "table for two");
    assert_eq!(transcriber.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_rate_limited_provider_without_retries_when_transcribing_then_called_once() {
    let (store, path) = store_with(AssetKind::Audio, "order.wav", &silent_wav(1, 16_000)).await;
    let transcriber = Arc::new(FlakyTranscriber::new(1));
    let sut = orchestrator(
        store,
        Arc::clone(&transcriber) as Arc<dyn TranscriptionEngine>,
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut.transcribe(Some(path.as_str())).await;

    assert!(matches!(result, Err(OrchestratorError::Provider { .. })));
    assert_eq!(transcriber.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_unsupported_format_when_transcribing_then_not_retried() {
    let (store, path) = store_with(AssetKind::Audio, "order.mp3", b"ID3 fake mp3").await;
    let transcriber = Arc::new(UnsupportedTranscriber {
        calls: AtomicU32::new(0),
    });
    let sut = orchestrator(
        store,
        Arc::clone(&transcriber) as Arc<dyn TranscriptionEngine>,
        Arc::new(MockReviewEngine::returning("unused")),
    )
    .with_retry_policy(fast_retries(4));

    let result = sut.transcribe(Some(path.as_str())).await;

    assert!(matches!(result, Err(OrchestratorError::Provider { .. })));
    assert_eq!(transcriber.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_stored_image_when_reviewing_then_options_reach_engine() {
    let (store, path) = store_with(AssetKind::Image, "menu.jpg", &fake_jpeg()).await;
    let reviewer = Arc::new(MockReviewEngine::returning("Try the ramen."));
    let sut = orchestrator(
        store,
        Arc::new(MockTranscriptionEngine::silent()),
        Arc::clone(&reviewer) as Arc<dyn ReviewEngine>,
    );
    let options = ReviewOptions {
        task: ReviewTask::Recommendation,
        language: "Japanese".to_string(),
        dietary_restrictions: Some("vegetarian".to_string()),
        allergies: Some("peanuts".to_string()),
        culture: None,
    };

    let result = sut.review(Some(path.as_str()), options.clone()).await.unwrap();

    assert_eq!(result.text, "Try the ramen.");
    assert_eq!(reviewer.last_options(), Some(options));
}

#[tokio::test]
async fn given_blank_review_when_reviewing_then_returns_empty_result() {
    let (store, path) = store_with(AssetKind::Image, "menu.jpg", &fake_jpeg()).await;
    let sut = orchestrator(
        store,
        Arc::new(MockTranscriptionEngine::silent()),
        Arc::new(MockReviewEngine::returning("  \n ")),
    );

    let result = sut.review(Some(path.as_str()), ReviewOptions::default()).await;

    assert!(matches!(result, Err(OrchestratorError::EmptyResult(AssetKind::Image))));
}

#[tokio::test]
async fn given_no_image_reference_when_reviewing_then_returns_missing_reference() {
    let sut = orchestrator(
        Arc::new(ObjectBlobStore::in_memory()),
        Arc::new(MockTranscriptionEngine::silent()),
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut.review(None, ReviewOptions::default()).await;

    assert!(matches!(result, Err(OrchestratorError::MissingReference(AssetKind::Image))));
}

#[tokio::test]
async fn given_deleted_image_when_reviewing_then_returns_not_found() {
    let (store, path) = store_with(AssetKind::Image, "menu.jpg", &fake_jpeg()).await;
    store.delete(&path).await.unwrap();
    let sut = orchestrator(
        store,
        Arc::new(MockTranscriptionEngine::silent()),
        Arc::new(MockReviewEngine::returning("unused")),
    );

    let result = sut.review(Some(path.as_str()), ReviewOptions::default()).await;

    assert!(matches!(
        result,
        Err(OrchestratorError::NotFound {
            kind: AssetKind::Image,
            ..
        })
    ));
}
