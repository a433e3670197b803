use serde::{Deserialize, Serialize};

/// Kind of analysis requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[default]
    Score,
    Generate,
    Predict,
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Score => write!(f, "score"),
            Self::Generate => write!(f, "generate"),
            Self::Predict => write!(f, "predict"),
        }
    }
}

impl std::str::FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "generate" => Ok(Self::Generate),
            "predict" => Ok(Self::Predict),
            other => Err(format!(
                "Unknown analysis type '{other}' (expected score, generate or predict)"
            )),
        }
    }
}

/// Functional class assigned to a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionalPrediction {
    Coding,
    NonCoding,
    Regulatory,
}

impl FunctionalPrediction {
    /// All classes, in a stable order
    pub const ALL: [Self; 3] = [Self::Coding, Self::NonCoding, Self::Regulatory];
}

impl std::fmt::Display for FunctionalPrediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coding => write!(f, "coding"),
            Self::NonCoding => write!(f, "non-coding"),
            Self::Regulatory => write!(f, "regulatory"),
        }
    }
}

/// Upper bound (inclusive) on `mutations_detected`
pub const MAX_MUTATIONS_DETECTED: u8 = 5;

/// Predictive annotations returned by a scoring backend for one sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBundle {
    /// Model likelihood, in [0, 1]
    pub likelihood_score: f64,
    pub functional_prediction: FunctionalPrediction,
    /// Conservation estimate, in [0, 1]
    pub conservation_score: f64,
    /// Number of mutations detected, in [0, 5]
    pub mutations_detected: u8,
}

impl PredictionBundle {
    /// Check that every field lies inside its documented range.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        (0.0..=1.0).contains(&self.likelihood_score)
            && (0.0..=1.0).contains(&self.conservation_score)
            && self.mutations_detected <= MAX_MUTATIONS_DETECTED
    }
}

/// Model status reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelStatus {
    /// A real scoring model is active
    Loaded,
    /// The mock backend is producing placeholder predictions
    MockMode,
}
