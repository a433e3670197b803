//! The sequence analysis pipeline.
//!
//! - [`metrics`]: Deterministic statistics computed from the sequence itself
//! - [`pipeline`]: The request flow and its error taxonomy
//!
//! ## Flow
//!
//! ```text
//! AnalysisRequest
//!   -> validate_sequence      (fail fast: empty, alphabet, length)
//!   -> gc_content             (pure)
//!   -> ScoringBackend::analyze (bounded by the backend timeout)
//!   -> AnalysisResult::assemble
//! ```
//!
//! Nothing is retried and no partial result is ever returned.
//!
//! ## Example
//!
//! ```rust
//! use dna_analyzer::analysis::AnalysisPipeline;
//! use dna_analyzer::backend::{BackendHandle, MockBackend};
//! use dna_analyzer::core::result::AnalysisRequest;
//! use dna_analyzer::core::types::AnalysisType;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let pipeline = AnalysisPipeline::new(BackendHandle::mock(MockBackend::instant(42)));
//! let result = pipeline
//!     .run(&AnalysisRequest::new("acgt", AnalysisType::Score))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(result.sequence.as_str(), "ACGT");
//! assert_eq!(result.gc_content, 50.0);
//! # });
//! ```

pub mod metrics;
pub mod pipeline;

pub use pipeline::{AnalysisError, AnalysisPipeline, FailureKind};
