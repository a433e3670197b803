use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::sequence::ValidatedSequence;
use crate::core::types::{AnalysisType, PredictionBundle};

/// An analysis request as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Raw, unvalidated sequence. A missing field reads as empty.
    #[serde(default)]
    pub sequence: String,

    #[serde(default, alias = "analysis_type")]
    pub analysis_type: AnalysisType,
}

impl AnalysisRequest {
    pub fn new(sequence: impl Into<String>, analysis_type: AnalysisType) -> Self {
        Self {
            sequence: sequence.into(),
            analysis_type,
        }
    }
}

/// The response entity for one successful analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sequence: ValidatedSequence,
    pub analysis_type: AnalysisType,
    /// Copy of `predictions.likelihood_score`
    pub score: f64,
    pub length: usize,
    /// Percentage in [0, 100]
    pub gc_content: f64,
    pub predictions: PredictionBundle,
    pub processing_time_seconds: f64,
}

impl AnalysisResult {
    /// Combine the pipeline outputs into a result.
    ///
    /// `elapsed` is the time spent after validation, up to assembly.
    #[must_use]
    pub fn assemble(
        sequence: ValidatedSequence,
        analysis_type: AnalysisType,
        gc_content: f64,
        predictions: PredictionBundle,
        elapsed: Duration,
    ) -> Self {
        Self {
            length: sequence.len(),
            sequence,
            analysis_type,
            score: predictions.likelihood_score,
            gc_content,
            predictions,
            processing_time_seconds: elapsed.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FunctionalPrediction;
    use crate::utils::validation::validate_sequence;

    fn bundle() -> PredictionBundle {
        PredictionBundle {
            likelihood_score: 0.625,
            functional_prediction: FunctionalPrediction::NonCoding,
            conservation_score: 0.5,
            mutations_detected: 3,
        }
    }

    #[test]
    fn test_assemble_copies_fields() {
        let seq = validate_sequence("acgtac").unwrap();
        let result = AnalysisResult::assemble(
            seq,
            AnalysisType::Predict,
            50.0,
            bundle(),
            Duration::from_millis(250),
        );

        assert_eq!(result.sequence.as_str(), "ACGTAC");
        assert_eq!(result.length, 6);
        assert_eq!(result.analysis_type, AnalysisType::Predict);
        assert!((result.score - 0.625).abs() < f64::EPSILON);
        assert!((result.gc_content - 50.0).abs() < f64::EPSILON);
        assert!((result.processing_time_seconds - 0.25).abs() < 1e-9);
        assert_eq!(result.predictions, bundle());
    }

    #[test]
    fn test_result_field_names() {
        let seq = validate_sequence("ACGT").unwrap();
        let result =
            AnalysisResult::assemble(seq, AnalysisType::Score, 50.0, bundle(), Duration::ZERO);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["sequence"], "ACGT");
        assert_eq!(json["analysisType"], "score");
        assert_eq!(json["length"], 4);
        assert_eq!(json["gcContent"], 50.0);
        assert_eq!(json["score"], 0.625);
        assert_eq!(json["processingTimeSeconds"], 0.0);
        assert_eq!(json["predictions"]["functionalPrediction"], "non-coding");
    }

    #[test]
    fn test_request_defaults() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"sequence": "ACGT"}"#).unwrap();
        assert_eq!(req.analysis_type, AnalysisType::Score);

        let req: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(req.sequence.is_empty());
    }

    #[test]
    fn test_request_accepts_snake_case_type() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"sequence": "ACGT", "analysis_type": "generate"}"#).unwrap();
        assert_eq!(req.analysis_type, AnalysisType::Generate);

        let req: AnalysisRequest =
            serde_json::from_str(r#"{"sequence": "ACGT", "analysisType": "predict"}"#).unwrap();
        assert_eq!(req.analysis_type, AnalysisType::Predict);
    }
}
