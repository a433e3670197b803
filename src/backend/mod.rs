//! Scoring backends and their startup lifecycle.
//!
//! A [`ScoringBackend`] turns a validated sequence into a [`PredictionBundle`].
//! Two kinds exist:
//!
//! - [`mock::MockBackend`]: randomized placeholder predictions with simulated latency
//! - a real model backend, produced at startup by a [`lifecycle::ModelLoader`]
//!
//! The rest of the pipeline treats both as opaque. Which one is active is
//! decided exactly once at process start by [`lifecycle::initialize`], which
//! returns the read-only [`lifecycle::BackendHandle`] shared by all requests.
//!
//! ## Concurrency
//!
//! `analyze` may be called concurrently from many request tasks. A backend
//! that keeps mutable state must serialize access to it internally; the mock
//! does this for its random number generator.

use async_trait::async_trait;

use crate::core::sequence::ValidatedSequence;
use crate::core::types::{AnalysisType, PredictionBundle};

pub mod latency;
pub mod lifecycle;
pub mod mock;

pub use lifecycle::{BackendHandle, BackendState};
pub use mock::MockBackend;

/// Failures a scoring backend can report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Scoring backend unavailable: {0}")]
    Unavailable(String),

    #[error("Scoring backend failed: {0}")]
    Failed(String),

    #[error("Scoring backend timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

impl BackendError {
    /// Short description that is safe to show to callers
    #[must_use]
    pub fn public_summary(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "scoring backend unavailable",
            Self::Failed(_) => "scoring backend error",
            Self::TimedOut(_) => "scoring backend timed out",
        }
    }
}

/// A component that produces predictive annotations for a sequence.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Human-readable backend name, used in logs
    fn name(&self) -> &str;

    /// Analyze one sequence.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unavailable` if the backend cannot serve requests,
    /// or `BackendError::Failed` if inference fails.
    async fn analyze(
        &self,
        sequence: &ValidatedSequence,
        analysis_type: AnalysisType,
    ) -> Result<PredictionBundle, BackendError>;
}
