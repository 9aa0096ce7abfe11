//! Fraud Verdict Service - Main Entry Point
//!
//! Serves the prediction form, the profiling dashboard, and the JSON API.

use anyhow::{Context, Result};
use fraud_detector::config::AppConfig;
use fraud_detector::registry::ModelKind;
use fraud_detector::web::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config)?;
    info!("Starting Fraud Verdict Service");
    info!(
        artifacts_dir = %config.models.artifacts_dir,
        dataset = %config.dataset.path,
        "Configuration loaded"
    );
    info!(
        models = ?ModelKind::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
        "Model registry ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("fraud_detector={}", config.logging.level).parse()?);

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}
