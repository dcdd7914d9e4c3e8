use anyhow::Context;
use tokio::net::TcpListener;

use menuscribe::infrastructure::audio::TranscriptionEngineFactory;
use menuscribe::infrastructure::llm::ReviewEngineFactory;
use menuscribe::infrastructure::observability::{TracingConfig, init_tracing};
use menuscribe::infrastructure::storage::BlobStoreFactory;
use menuscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let blob_store =
        BlobStoreFactory::create(&settings.storage).context("Failed to open blob store")?;
    let transcriber = TranscriptionEngineFactory::create(&settings.transcription)
        .context("Failed to configure transcription provider")?;
    let reviewer = ReviewEngineFactory::create(&settings.review)
        .context("Failed to configure review provider")?;

    tracing::info!(
        storage = ?settings.storage.provider,
        transcription = ?settings.transcription.provider,
        review = ?settings.review.provider,
        "Providers configured"
    );

    let state = AppState::from_settings(&settings, blob_store, transcriber, reviewer);
    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
