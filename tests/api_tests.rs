//! HTTP API tests
//!
//! These drive the full router, middleware included, through
//! `tower::ServiceExt::oneshot` without binding a socket.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use dna_analyzer::backend::lifecycle::{self, ConfiguredModel, ModelLoader};
use dna_analyzer::backend::BackendError;
use dna_analyzer::config::{BackendConfig, ServiceConfig};
use dna_analyzer::web::server::create_router;
use dna_analyzer::{
    AnalysisType, BackendHandle, FunctionalPrediction, MockBackend, PredictionBundle,
    ScoringBackend, ValidatedSequence,
};

fn mock_router(seed: u64) -> Router {
    create_router(
        BackendHandle::mock(MockBackend::instant(seed)),
        &ServiceConfig::default(),
    )
}

fn test_backend_config() -> BackendConfig {
    BackendConfig {
        model: None,
        seed: Some(1),
        mock_latency: std::time::Duration::ZERO,
    }
}

/// Loader that always succeeds with the given backend
struct StaticLoader(Arc<dyn ScoringBackend>);

#[async_trait]
impl ModelLoader for StaticLoader {
    async fn load(&self) -> Result<Arc<dyn ScoringBackend>, BackendError> {
        Ok(Arc::clone(&self.0))
    }
}

async fn router_with_model(backend: Arc<dyn ScoringBackend>) -> Router {
    let handle = lifecycle::initialize(&StaticLoader(backend), &test_backend_config())
        .await
        .expect("lifecycle should settle");
    create_router(handle, &ServiceConfig::default())
}

struct FixedModel;

#[async_trait]
impl ScoringBackend for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn analyze(
        &self,
        _sequence: &ValidatedSequence,
        _analysis_type: AnalysisType,
    ) -> Result<PredictionBundle, BackendError> {
        Ok(PredictionBundle {
            likelihood_score: 0.75,
            functional_prediction: FunctionalPrediction::Regulatory,
            conservation_score: 0.5,
            mutations_detected: 1,
        })
    }
}

struct FailingModel;

#[async_trait]
impl ScoringBackend for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    async fn analyze(
        &self,
        _sequence: &ValidatedSequence,
        _analysis_type: AnalysisType,
    ) -> Result<PredictionBundle, BackendError> {
        Err(BackendError::Failed(
            "GPU context lost: device 0 at /dev/nvidia0".to_string(),
        ))
    }
}

struct PanickingModel;

#[async_trait]
impl ScoringBackend for PanickingModel {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn analyze(
        &self,
        _sequence: &ValidatedSequence,
        _analysis_type: AnalysisType,
    ) -> Result<PredictionBundle, BackendError> {
        panic!("inference kernel crashed");
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: &Value) -> Request<Body> {
    post_raw(&body.to_string())
}

fn post_raw(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_reports_running_in_mock_mode() {
    let (status, body) = send(mock_router(1), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["modelLoaded"], false);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn test_health_reports_mock_mode() {
    let (status, body) = send(mock_router(1), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["modelStatus"], "mockMode");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unconfigured_model_settles_in_mock_mode() {
    let handle = lifecycle::initialize(&ConfiguredModel::default(), &test_backend_config())
        .await
        .unwrap();
    let app = create_router(handle, &ServiceConfig::default());

    let (_, body) = send(app, get("/health")).await;
    assert_eq!(body["modelStatus"], "mockMode");
}

#[tokio::test]
async fn test_loaded_model_reported() {
    let app = router_with_model(Arc::new(FixedModel)).await;

    let (_, root) = send(app.clone(), get("/")).await;
    assert_eq!(root["modelLoaded"], true);

    let (_, health) = send(app, get("/health")).await;
    assert_eq!(health["modelStatus"], "loaded");
}

#[tokio::test]
async fn test_analyze_acgt() {
    let (status, body) = send(mock_router(3), post_json(&json!({"sequence": "ACGT"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sequence"], "ACGT");
    assert_eq!(body["analysisType"], "score");
    assert_eq!(body["length"], 4);
    assert_eq!(body["gcContent"], 50.0);
    assert_eq!(body["score"], body["predictions"]["likelihoodScore"]);
    assert!(body["processingTimeSeconds"].as_f64().unwrap() >= 0.0);

    let predictions = &body["predictions"];
    let likelihood = predictions["likelihoodScore"].as_f64().unwrap();
    let conservation = predictions["conservationScore"].as_f64().unwrap();
    let mutations = predictions["mutationsDetected"].as_u64().unwrap();
    assert!((0.0..=1.0).contains(&likelihood));
    assert!((0.0..=1.0).contains(&conservation));
    assert!(mutations <= 5);
    assert!(["coding", "non-coding", "regulatory"]
        .contains(&predictions["functionalPrediction"].as_str().unwrap()));
}

#[tokio::test]
async fn test_analyze_uses_loaded_model() {
    let app = router_with_model(Arc::new(FixedModel)).await;
    let (status, body) = send(
        app,
        post_json(&json!({"sequence": "GGGG", "analysisType": "predict"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysisType"], "predict");
    assert_eq!(body["gcContent"], 100.0);
    assert_eq!(body["score"], 0.75);
    assert_eq!(body["predictions"]["functionalPrediction"], "regulatory");
    assert_eq!(body["predictions"]["mutationsDetected"], 1);
}

#[tokio::test]
async fn test_analyze_all_adenine() {
    let (status, body) = send(mock_router(3), post_json(&json!({"sequence": "AAAA"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gcContent"], 0.0);
}

#[tokio::test]
async fn test_analyze_normalizes_lower_case() {
    let (status, body) = send(mock_router(3), post_json(&json!({"sequence": "acgt"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sequence"], "ACGT");
}

#[tokio::test]
async fn test_analyze_accepts_snake_case_type() {
    let (status, body) = send(
        mock_router(3),
        post_json(&json!({"sequence": "ACGT", "analysis_type": "generate"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysisType"], "generate");
}

#[tokio::test]
async fn test_analyze_rejects_invalid_character() {
    let (status, body) = send(mock_router(3), post_json(&json!({"sequence": "ACGTX"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Invalid DNA sequence. Only A, C, G, T are allowed"
    );
}

#[tokio::test]
async fn test_analyze_rejects_empty() {
    let (status, body) = send(mock_router(3), post_json(&json!({"sequence": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "DNA sequence is required");

    let (status, body) = send(mock_router(3), post_json(&json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "DNA sequence is required");
}

#[tokio::test]
async fn test_analyze_rejects_too_long() {
    let sequence = "A".repeat(10_001);
    let (status, body) = send(mock_router(3), post_json(&json!({"sequence": sequence}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Sequence too long. Maximum 10,000 base pairs for demo"
    );
}

#[tokio::test]
async fn test_analyze_accepts_maximum_length() {
    let sequence = "C".repeat(10_000);
    let (status, body) = send(mock_router(3), post_json(&json!({"sequence": sequence}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["length"], 10_000);
    assert_eq!(body["gcContent"], 100.0);
}

#[tokio::test]
async fn test_analyze_rejects_malformed_body() {
    let (status, body) = send(mock_router(3), post_raw("{\"sequence\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid request body");
}

#[tokio::test]
async fn test_analyze_rejects_unknown_analysis_type() {
    let (status, body) = send(
        mock_router(3),
        post_json(&json!({"sequence": "ACGT", "analysisType": "align"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid request body");
}

#[tokio::test]
async fn test_backend_failure_is_500_without_details() {
    let app = router_with_model(Arc::new(FailingModel)).await;
    let (status, body) = send(app, post_json(&json!({"sequence": "ACGT"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert_eq!(detail, "Analysis failed: scoring backend error");
    assert!(!detail.contains("nvidia"));
}

#[tokio::test]
async fn test_backend_panic_is_500() {
    let app = router_with_model(Arc::new(PanickingModel)).await;
    let (status, body) = send(app, post_json(&json!({"sequence": "ACGT"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Analysis failed: internal error");
}

#[tokio::test]
async fn test_security_headers_present() {
    let response = mock_router(1).oneshot(get("/health")).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_same_seed_same_predictions() {
    let request = json!({"sequence": "GATTACA"});
    let (_, first) = send(mock_router(99), post_json(&request)).await;
    let (_, second) = send(mock_router(99), post_json(&request)).await;

    assert_eq!(first["predictions"], second["predictions"]);
}

#[tokio::test]
async fn test_concurrent_requests_share_backend() {
    let app = mock_router(5);

    let tasks: Vec<_> = (0..25)
        .map(|i| {
            let app = app.clone();
            let sequence = "ACGT".repeat(i + 1);
            tokio::spawn(async move {
                let (status, body) = send(app, post_json(&json!({"sequence": sequence}))).await;
                (i, status, body)
            })
        })
        .collect();

    for task in tasks {
        let (i, status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["length"], 4 * (i + 1));
        assert_eq!(body["gcContent"], 50.0);
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = send(mock_router(1), get("/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
