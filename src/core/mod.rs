//! Core data types for sequence analysis.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`result::AnalysisRequest`]: The caller's input, as received by the service
//! - [`sequence::ValidatedSequence`]: An upper-cased sequence over {A, C, G, T} that passed validation
//! - [`types::PredictionBundle`]: Annotations produced by a scoring backend
//! - [`result::AnalysisResult`]: The assembled response
//! - [`types::AnalysisType`], [`types::FunctionalPrediction`], [`types::ModelStatus`]: Classification types
//!
//! ## Wire Format
//!
//! All types serialize with camelCase field names, e.g.
//!
//! ```text
//! {"sequence": "ACGT", "analysisType": "score", "score": 0.42, "length": 4,
//!  "gcContent": 50.0, "predictions": {...}, "processingTimeSeconds": 0.5}
//! ```

pub mod result;
pub mod sequence;
pub mod types;
