//! Application startup and lifecycle management.

use crate::config::ReaderConfig;
use crate::handlers;
use crate::services::extraction::{PdftotextExtractor, TextExtractor};
use crate::services::lexicon::{self, Lexicon, WordNet};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{screened_categories, GenerationParams, TextProvider};
use crate::services::uploads::UploadArea;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    make_request_span, metrics_middleware, request_id_middleware, security_headers_middleware,
    REQUEST_ID_HEADER,
};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: ReaderConfig,
    pub extractor: Arc<dyn TextExtractor>,
    pub lexicon: Arc<dyn Lexicon>,
    pub text_provider: Arc<dyn TextProvider>,
    pub uploads: Arc<UploadArea>,
}

impl AppState {
    /// Wire up the production collaborators described by `config`.
    pub async fn from_config(config: ReaderConfig) -> Result<Self, AppError> {
        let uploads = UploadArea::new(&config.upload.dir).await.map_err(|e| {
            tracing::error!(dir = ?config.upload.dir, error = %e, "Failed to prepare upload directory");
            e
        })?;

        let lexicon = load_lexicon(&config).await?;

        let extractor = PdftotextExtractor::new(
            &config.extraction.pdftotext_path,
            Duration::from_secs(config.extraction.timeout_secs),
        );

        let mut text_provider = GeminiTextProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_secs),
            params: GenerationParams::default(),
            safety: screened_categories(),
        })
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
        if let Some(base_url) = &config.gemini.base_url {
            text_provider = text_provider.with_base_url(base_url);
        }

        tracing::info!(
            model = %config.gemini.model,
            upload_dir = ?uploads.path(),
            extractor = extractor.name(),
            "Reader services initialized"
        );

        Ok(Self {
            config,
            extractor: Arc::new(extractor),
            lexicon,
            text_provider: Arc::new(text_provider),
            uploads: Arc::new(uploads),
        })
    }
}

/// Fetch the dictionary if needed, then parse it off the async workers.
async fn load_lexicon(config: &ReaderConfig) -> Result<Arc<dyn Lexicon>, AppError> {
    let settings = &config.lexicon;
    lexicon::ensure_dataset(&settings.dir, &settings.download_url, settings.auto_download)
        .await
        .map_err(|e| {
            tracing::error!(dir = ?settings.dir, error = %e, "Lexical database unavailable");
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

    let dir = settings.dir.clone();
    let wordnet = tokio::task::spawn_blocking(move || WordNet::load(&dir))
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Lexicon loader panicked: {}", e)))?
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

    Ok(Arc::new(wordnet))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_bytes;
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/upload", post(handlers::upload_file))
        .route("/define", post(handlers::define_word))
        .route("/chat", post(handlers::chat))
        .route("/translate", post(handlers::translate_text))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                    None
                }
            }
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: ServerFuture,
}

impl Application {
    pub async fn build(config: ReaderConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config).await?;
        Self::with_state(state).await
    }

    /// Bind and serve an already assembled state (port 0 picks a free port).
    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        let addr = state.config.common.bind_address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        Ok(Self {
            port,
            server: Box::pin(server),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
