use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use menuscribe::infrastructure::observability::{
    MAX_REQUEST_ID_LEN, REQUEST_ID_HEADER, RequestId, request_id_middleware,
};

fn app() -> Router {
    Router::new()
        .route(
            "/",
            get(|request: Request<Body>| async move {
                request
                    .extensions()
                    .get::<RequestId>()
                    .map(|id| id.0.clone())
                    .unwrap_or_default()
            }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[tokio::test]
async fn given_request_without_id_when_handled_then_generated_id_is_echoed() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let header = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert_eq!(header.len(), 36);
}

#[tokio::test]
async fn given_request_with_id_when_handled_then_handler_and_response_see_same_id() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "trace-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "trace-42");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"trace-42");
}

#[test]
fn given_oversized_header_when_reading_request_id_then_generates_new_one() {
    let mut headers = HeaderMap::new();
    let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&long).unwrap());

    let id = RequestId::from_headers(&headers);

    assert_ne!(id.as_str(), long);
    assert_eq!(id.as_str().len(), 36);
}

#[test]
fn given_header_with_spaces_when_reading_request_id_then_generates_new_one() {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("id with spaces"));

    let id = RequestId::from_headers(&headers);

    assert_ne!(id.as_str(), "id with spaces");
}

#[test]
fn given_generated_ids_when_compared_then_they_differ() {
    assert_ne!(RequestId::generate().0, RequestId::generate().0);
}
