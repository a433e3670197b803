use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::{AnalysisError, AnalysisPipeline};
use crate::backend::lifecycle::{self, ConfiguredModel};
use crate::backend::BackendHandle;
use crate::config::ServiceConfig;
use crate::core::result::{AnalysisRequest, AnalysisResult};
use crate::core::types::ModelStatus;
use crate::web::error::{handle_panic, ApiError};

/// Service name reported by the root endpoint
pub const SERVICE_NAME: &str = "DNA Sequence Analysis API";

/// Version reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state
pub struct AppState {
    pub pipeline: AnalysisPipeline,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_status: ModelStatus,
    pub version: &'static str,
}

/// Aborts the wrapped task when dropped, so a cancelled request cancels its analysis
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(config: ServiceConfig) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(config).await })
}

/// Create the application router with all routes and middleware configured.
///
/// The backend handle is injected here and shared read-only by every handler.
pub fn create_router(backend: BackendHandle, config: &ServiceConfig) -> Router {
    let pipeline = AnalysisPipeline::new(backend).with_backend_timeout(config.backend_timeout);
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Turn handler panics into a 500 with a generic body
                .layer(CatchPanicLayer::custom(handle_panic))
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(cors)
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    config.request_timeout,
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(config.max_concurrency))
                .layer(DefaultBodyLimit::max(config.max_body_size)),
        )
}

async fn run_server(config: ServiceConfig) -> anyhow::Result<()> {
    tracing::info!("Starting DNA sequence analysis service...");

    let loader = ConfiguredModel::new(config.backend.model.clone());
    let backend = lifecycle::initialize(&loader, &config.backend).await?;
    tracing::info!(state = %backend.state(), "Scoring backend initialized");

    let app = create_router(backend, &config);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr).await?;
    println!("Starting dna-analyzer web server at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Liveness endpoint
async fn root_handler(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_NAME,
        status: "running",
        model_loaded: state.pipeline.backend().model_loaded(),
    })
}

/// Detailed health check
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_status: state.pipeline.backend().model_status(),
        version: VERSION,
    })
}

/// API endpoint for analyzing a sequence
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload?;

    tracing::debug!(
        length = request.sequence.len(),
        analysis_type = %request.analysis_type,
        "Analyzing sequence"
    );

    // Run on its own task so a panic in the backend surfaces as a typed error
    let task = tokio::spawn(async move { state.pipeline.run(&request).await });
    let mut task = AbortOnDrop(task);

    let result = (&mut task.0)
        .await
        .map_err(|err| AnalysisError::Internal(format!("analysis task failed: {err}")))??;

    Ok(Json(result))
}
