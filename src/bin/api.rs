use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use eoc_rating::{
    app_state::AppState, config::Config, pipeline::RatingPipeline, router::router,
    taxonomy::eoc_taxonomy, telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let taxonomy = Arc::new(eoc_taxonomy()?);
    info!(
        measures = taxonomy.measures().len(),
        total_weight = taxonomy.total_possible_weight(),
        "taxonomy loaded"
    );

    let pipeline = RatingPipeline::with_google_translator(&config, taxonomy)?;
    let app = router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr()))?;
    info!(addr = config.bind_addr(), "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
