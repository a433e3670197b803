use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::backend::latency::{Latency, NoLatency, TokioSleep};
use crate::backend::{BackendError, ScoringBackend};
use crate::core::sequence::ValidatedSequence;
use crate::core::types::{
    AnalysisType, FunctionalPrediction, PredictionBundle, MAX_MUTATIONS_DETECTED,
};

/// Simulated inference cost of the mock backend
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(500);

/// Likelihood scores are drawn uniformly from this range
pub const LIKELIHOOD_RANGE: std::ops::RangeInclusive<f64> = 0.1..=0.9;

/// Stand-in backend producing randomized predictions.
///
/// The output shape is fixed and the values are random. Construct with
/// [`MockBackend::seeded`] for reproducible output.
pub struct MockBackend {
    rng: Mutex<StdRng>,
    latency: Arc<dyn Latency>,
    delay: Duration,
}

impl MockBackend {
    pub fn new(rng: StdRng, latency: Arc<dyn Latency>, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(rng),
            latency,
            delay,
        }
    }

    /// Mock seeded from OS entropy, sleeping on the tokio timer
    pub fn from_entropy(delay: Duration) -> Self {
        Self::new(StdRng::from_entropy(), Arc::new(TokioSleep), delay)
    }

    /// Reproducible mock, sleeping on the tokio timer
    pub fn seeded(seed: u64, delay: Duration) -> Self {
        Self::new(StdRng::seed_from_u64(seed), Arc::new(TokioSleep), delay)
    }

    /// Reproducible mock without any delay
    pub fn instant(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), Arc::new(NoLatency), Duration::ZERO)
    }

    fn draw(&self) -> PredictionBundle {
        // A panic elsewhere cannot leave the generator in a broken state
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let likelihood_score = rng.gen_range(LIKELIHOOD_RANGE);
        let functional_prediction = *FunctionalPrediction::ALL
            .choose(&mut *rng)
            .unwrap_or(&FunctionalPrediction::Coding);
        let conservation_score = rng.gen_range(0.0..=1.0);
        let mutations_detected = rng.gen_range(0..=MAX_MUTATIONS_DETECTED);

        PredictionBundle {
            likelihood_score,
            functional_prediction,
            conservation_score,
            mutations_detected,
        }
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ScoringBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(
        &self,
        sequence: &ValidatedSequence,
        analysis_type: AnalysisType,
    ) -> Result<PredictionBundle, BackendError> {
        // Draw before waiting so the lock is never held across an await
        let bundle = self.draw();

        tracing::debug!(
            length = sequence.len(),
            %analysis_type,
            delay_ms = self.delay.as_millis(),
            "Mock backend producing placeholder predictions"
        );
        self.latency.wait(self.delay).await;

        Ok(bundle)
    }
}
