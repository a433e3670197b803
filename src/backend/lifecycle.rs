//! One-shot selection of the active scoring backend.
//!
//! ```text
//! Uninitialized -> Loading -> Ready     (model loaded)
//!                          -> MockMode  (model unavailable, mock fallback)
//! ```
//!
//! The transition out of `Loading` happens exactly once. There is no retry
//! and no hot reload: the resulting [`BackendHandle`] is frozen for the life
//! of the process and only read afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::backend::mock::MockBackend;
use crate::backend::{BackendError, ScoringBackend};
use crate::config::BackendConfig;
use crate::core::types::ModelStatus;

/// Lifecycle state of the scoring backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendState {
    Uninitialized,
    Loading,
    /// A real model backend is active
    Ready,
    /// The mock backend is active
    MockMode,
}

impl BackendState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::MockMode)
    }

    /// Status exposed to health checks; `None` until a terminal state is reached
    #[must_use]
    pub fn model_status(self) -> Option<ModelStatus> {
        match self {
            Self::Ready => Some(ModelStatus::Loaded),
            Self::MockMode => Some(ModelStatus::MockMode),
            Self::Uninitialized | Self::Loading => None,
        }
    }
}

impl std::fmt::Display for BackendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::MockMode => write!(f, "mock mode"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Invalid backend lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        from: BackendState,
        to: BackendState,
    },
}

/// Produces the real model backend at startup.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns `BackendError::Unavailable` when no model can be loaded.
    async fn load(&self) -> Result<Arc<dyn ScoringBackend>, BackendError>;
}

/// Loader driven by [`BackendConfig::model`].
///
/// No inference runtime is linked into this build, so loading always reports
/// the backend as unavailable and the service falls back to mock mode.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredModel {
    pub model: Option<String>,
}

impl ConfiguredModel {
    pub fn new(model: Option<String>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl ModelLoader for ConfiguredModel {
    async fn load(&self) -> Result<Arc<dyn ScoringBackend>, BackendError> {
        match &self.model {
            None => Err(BackendError::Unavailable("no model configured".to_string())),
            Some(model) => Err(BackendError::Unavailable(format!(
                "model '{model}' requested but no inference runtime is available"
            ))),
        }
    }
}

/// Tracks the backend through startup and hands out the frozen handle.
#[derive(Debug)]
pub struct BackendLifecycle {
    state: BackendState,
}

impl Default for BackendLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendLifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: BackendState::Uninitialized,
        }
    }

    #[must_use]
    pub fn state(&self) -> BackendState {
        self.state
    }

    /// Move from `Uninitialized` to `Loading`.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` from any other state.
    pub fn begin_loading(&mut self) -> Result<(), LifecycleError> {
        self.transition(BackendState::Uninitialized, BackendState::Loading)
    }

    /// Leave `Loading` based on the outcome of the model load.
    ///
    /// A loaded model yields `Ready`; any load error yields `MockMode` with the
    /// backend built by `fallback`.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` unless the lifecycle is `Loading`.
    pub fn settle<F>(
        mut self,
        loaded: Result<Arc<dyn ScoringBackend>, BackendError>,
        fallback: F,
    ) -> Result<BackendHandle, LifecycleError>
    where
        F: FnOnce() -> Arc<dyn ScoringBackend>,
    {
        match loaded {
            Ok(backend) => {
                self.transition(BackendState::Loading, BackendState::Ready)?;
                tracing::info!(backend = backend.name(), "Scoring model loaded successfully");
                Ok(BackendHandle::new(self.state, backend))
            }
            Err(err) => {
                self.transition(BackendState::Loading, BackendState::MockMode)?;
                tracing::warn!(reason = %err, "Running in mock mode - scoring model not loaded");
                Ok(BackendHandle::new(self.state, fallback()))
            }
        }
    }

    fn transition(&mut self, from: BackendState, to: BackendState) -> Result<(), LifecycleError> {
        if self.state != from {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::debug!(from = %self.state, to = %to, "Backend lifecycle transition");
        self.state = to;
        Ok(())
    }
}

/// The active scoring backend, frozen after startup.
///
/// Cloning is cheap; every request handler reads the same backend.
#[derive(Clone)]
pub struct BackendHandle {
    state: BackendState,
    backend: Arc<dyn ScoringBackend>,
}

impl BackendHandle {
    fn new(state: BackendState, backend: Arc<dyn ScoringBackend>) -> Self {
        debug_assert!(state.is_terminal());
        Self { state, backend }
    }

    /// Handle backed by the mock, as if the model failed to load
    #[must_use]
    pub fn mock(backend: MockBackend) -> Self {
        Self::new(BackendState::MockMode, Arc::new(backend))
    }

    /// Terminal lifecycle state: `Ready` or `MockMode`
    #[must_use]
    pub fn state(&self) -> BackendState {
        self.state
    }

    #[must_use]
    pub fn model_loaded(&self) -> bool {
        self.state == BackendState::Ready
    }

    #[must_use]
    pub fn model_status(&self) -> ModelStatus {
        if self.model_loaded() {
            ModelStatus::Loaded
        } else {
            ModelStatus::MockMode
        }
    }

    #[must_use]
    pub fn backend(&self) -> &dyn ScoringBackend {
        self.backend.as_ref()
    }
}

impl std::fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendHandle")
            .field("state", &self.state)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Run the startup lifecycle once and return the frozen handle.
///
/// # Errors
///
/// Only fails on an internal lifecycle violation, which cannot happen when
/// starting from a fresh lifecycle.
pub async fn initialize(
    loader: &dyn ModelLoader,
    config: &BackendConfig,
) -> Result<BackendHandle, LifecycleError> {
    let mut lifecycle = BackendLifecycle::new();
    lifecycle.begin_loading()?;
    tracing::info!("Loading scoring backend...");

    let loaded = loader.load().await;
    lifecycle.settle(loaded, || {
        let mock = match config.seed {
            Some(seed) => MockBackend::seeded(seed, config.mock_latency),
            None => MockBackend::from_entropy(config.mock_latency),
        };
        let backend: Arc<dyn ScoringBackend> = Arc::new(mock);
        backend
    })
}
