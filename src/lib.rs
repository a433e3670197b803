//! # dna-analyzer
//!
//! A library and service for analyzing DNA sequences.
//!
//! A request carries a nucleotide sequence. `dna-analyzer` validates it,
//! computes deterministic metrics such as GC content, and asks a pluggable
//! scoring backend for predictive annotations: a likelihood score, a
//! functional classification, a conservation estimate and a mutation count.
//!
//! ## Features
//!
//! - **Strict validation**: Only A, C, G, T (any case), at most 10,000 bases
//! - **Deterministic metrics**: GC content and base composition
//! - **Pluggable scoring**: Any [`backend::ScoringBackend`]; a seedable mock ships by default
//! - **One-shot backend lifecycle**: The backend is chosen once at startup and then frozen
//! - **HTTP API**: `GET /`, `POST /analyze`, `GET /health`
//!
//! ## Example
//!
//! ```rust
//! use dna_analyzer::{AnalysisPipeline, AnalysisRequest, AnalysisType, BackendHandle, MockBackend};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! // Reproducible mock predictions without simulated latency
//! let pipeline = AnalysisPipeline::new(BackendHandle::mock(MockBackend::instant(7)));
//!
//! let result = pipeline
//!     .run(&AnalysisRequest::new("GATTACA", AnalysisType::Score))
//!     .await
//!     .unwrap();
//!
//! println!("{}: GC {:.1}%, score {:.3}", result.sequence, result.gc_content, result.score);
//! # });
//! ```
//!
//! ## Modules
//!
//! - [`analysis`]: The pipeline and sequence metrics
//! - [`backend`]: Scoring backends and their startup lifecycle
//! - [`core`]: Request, sequence, prediction and result types
//! - [`config`]: Service configuration
//! - [`utils`]: Sequence validation
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP service

pub mod analysis;
pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::analysis::{AnalysisError, AnalysisPipeline};
pub use crate::backend::{BackendHandle, BackendState, MockBackend, ScoringBackend};
pub use crate::core::result::{AnalysisRequest, AnalysisResult};
pub use crate::core::sequence::ValidatedSequence;
pub use crate::core::types::*;
pub use crate::utils::validation::{validate_sequence, ValidationError};
