use std::time::Duration;

use tokio::time::Instant;

use crate::analysis::metrics;
use crate::backend::{BackendError, BackendHandle};
use crate::config::DEFAULT_BACKEND_TIMEOUT;
use crate::core::result::{AnalysisRequest, AnalysisResult};
use crate::utils::validation::{validate_sequence, ValidationError};

/// Everything that can stop an analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Caller-facing classification of an [`AnalysisError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The input was rejected; maps to 400
    InvalidInput,
    /// The service failed; maps to 500
    ServiceFailure,
}

impl AnalysisError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::InvalidInput,
            Self::Backend(_) | Self::Internal(_) => FailureKind::ServiceFailure,
        }
    }

    /// Message returned to the caller. Never contains backend internals.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Backend(err) => format!("Analysis failed: {}", err.public_summary()),
            Self::Internal(_) => "Analysis failed: internal error".to_string(),
        }
    }
}

/// Validate, measure, score and assemble, one request at a time.
///
/// The pipeline holds the frozen [`BackendHandle`] and is shared read-only
/// by all request handlers.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    backend: BackendHandle,
    backend_timeout: Duration,
}

impl AnalysisPipeline {
    #[must_use]
    pub fn new(backend: BackendHandle) -> Self {
        Self {
            backend,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    #[must_use]
    pub fn backend(&self) -> &BackendHandle {
        &self.backend
    }

    /// Run one analysis.
    ///
    /// `processing_time_seconds` covers the work after validation: metric
    /// computation and the backend call.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Validation` for rejected input, and
    /// `AnalysisError::Backend` if scoring fails or exceeds the backend timeout.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let sequence = validate_sequence(&request.sequence)?;
        let start = Instant::now();

        let gc_content = metrics::gc_content(sequence.as_bytes());

        let predictions = tokio::time::timeout(
            self.backend_timeout,
            self.backend
                .backend()
                .analyze(&sequence, request.analysis_type),
        )
        .await
        .map_err(|_| BackendError::TimedOut(self.backend_timeout))??;

        if !predictions.is_within_bounds() {
            return Err(AnalysisError::Backend(BackendError::Failed(format!(
                "backend '{}' returned out-of-range predictions: {predictions:?}",
                self.backend.backend().name()
            ))));
        }

        let elapsed = start.elapsed();
        tracing::info!(
            length = sequence.len(),
            analysis_type = %request.analysis_type,
            elapsed_ms = elapsed.as_millis(),
            "Analysis completed for sequence length {}",
            sequence.len()
        );

        Ok(AnalysisResult::assemble(
            sequence,
            request.analysis_type,
            gc_content,
            predictions,
            elapsed,
        ))
    }
}
