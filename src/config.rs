//! Service configuration.
//!
//! Values come from command-line flags (see [`crate::cli`]); host and port can
//! also be set through the `HOST` and `PORT` environment variables.

use std::time::Duration;

use crate::backend::mock::DEFAULT_MOCK_LATENCY;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Upper bound on a single HTTP request, end to end
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on a single backend `analyze` call
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_MAX_CONCURRENCY: usize = 100;

/// Request bodies above this size are rejected before parsing
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB

/// Scoring backend selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Model to load at startup; `None` runs the mock backend
    pub model: Option<String>,
    /// Seed for the mock backend; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Simulated inference time of the mock backend
    pub mock_latency: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: None,
            seed: None,
            mock_latency: DEFAULT_MOCK_LATENCY,
        }
    }
}

/// Configuration for the HTTP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub address: String,
    pub port: u16,
    pub backend: BackendConfig,
    pub request_timeout: Duration,
    pub backend_timeout: Duration,
    pub max_concurrency: usize,
    pub max_body_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            backend: BackendConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl ServiceConfig {
    /// `address:port`, ready for `TcpListener::bind`
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
