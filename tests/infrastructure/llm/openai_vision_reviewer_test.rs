use std::time::Duration;

use menuscribe::application::ports::{ReviewEngine, ReviewError};
use menuscribe::domain::{ReviewOptions, ReviewTask};
use menuscribe::infrastructure::llm::OpenAiVisionReviewer;

use crate::helpers::{fake_jpeg, start_mock_provider};

fn reviewer(base_url: &str) -> OpenAiVisionReviewer {
    OpenAiVisionReviewer::new(
        "sk-vision".to_string(),
        Some(base_url.to_string()),
        "gpt-4o-mini".to_string(),
        256,
        0.3,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn given_completion_when_reviewing_then_returns_message_content() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":" Order the dumplings. "}}]}"#;
    let (base_url, captured, shutdown_tx) = start_mock_provider(200, body).await;

    let result = reviewer(&base_url)
        .review(
            &fake_jpeg(),
            "image/png",
            &ReviewOptions::for_task(ReviewTask::Recommendation),
        )
        .await;

    assert_eq!(result.unwrap(), "Order the dumplings.");
    let request = captured.lock().unwrap().clone().unwrap();
    assert_eq!(request.path, "/chat/completions");
    assert_eq!(request.authorization.as_deref(), Some("Bearer sk-vision"));
    let json: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    let image_url = json["messages"][0]["content"][0]["image_url"]["url"]
        .as_str()
        .unwrap();
    assert!(image_url.starts_with("data:image/png;base64,"));
    assert_eq!(json["model"], "gpt-4o-mini");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_reviewing_then_returns_api_request_failed() {
    let (base_url, _captured, shutdown_tx) = start_mock_provider(503, "overloaded").await;

    let result = reviewer(&base_url)
        .review(&fake_jpeg(), "image/jpeg", &ReviewOptions::default())
        .await;

    assert!(matches!(result, Err(ReviewError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unexpected_shape_when_reviewing_then_returns_invalid_response() {
    let (base_url, _captured, shutdown_tx) = start_mock_provider(200, r#"{"result":"ok"}"#).await;

    let result = reviewer(&base_url)
        .review(&fake_jpeg(), "image/jpeg", &ReviewOptions::default())
        .await;

    assert!(matches!(result, Err(ReviewError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}
