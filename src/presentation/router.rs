use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, recommendation_handler, review_upload_handler, root_handler,
    serve_audio_handler, serve_image_handler, simple_menu_handler, summarize_handler,
    transcribe_handler, upload_audio_handler, upload_image_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.max_upload_size_bytes);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_image_handler))
        .route("/upload_audio", post(upload_audio_handler))
        .route("/summarize", post(summarize_handler))
        .route("/simple_menu", post(simple_menu_handler))
        .route("/recommendation", post(recommendation_handler))
        .route("/transcribe", post(transcribe_handler))
        .route("/api/review", post(review_upload_handler))
        .route("/uploads/{name}", get(serve_image_handler))
        .route("/audio_uploads/{name}", get(serve_audio_handler))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
