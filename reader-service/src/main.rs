use reader_service::config::ReaderConfig;
use reader_service::services::metrics::init_metrics;
use reader_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ReaderConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "reader-service",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    init_metrics().map_err(|e| {
        tracing::error!("Failed to initialize metrics: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start reader-service: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    tracing::info!(port = application.port(), "reader-service started");
    application.run_until_stopped().await
}
