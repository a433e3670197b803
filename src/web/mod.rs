//! HTTP transport for the analysis pipeline.
//!
//! This module exposes the pipeline as a small JSON API using Axum.
//! The scoring backend is selected once at startup and injected into the
//! router; handlers only read it.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on the default address 0.0.0.0:8000
//! dna-analyzer serve
//!
//! # Custom port, reproducible mock predictions
//! dna-analyzer serve --port 3000 --seed 42
//!
//! # Address and port from the environment
//! HOST=127.0.0.1 PORT=9000 dna-analyzer serve
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Liveness: `{message, status, modelLoaded}`
//! - `POST /analyze` - Analyze `{sequence, analysisType?}`; 400/500 carry `{detail}`
//! - `GET /health` - `{status, modelStatus, version}`

pub mod error;
pub mod server;
