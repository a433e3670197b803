use serde::Serialize;

use crate::analysis::metrics::{self, BaseComposition};

/// An upper-case nucleotide sequence that passed validation.
///
/// Only [`crate::utils::validation::validate_sequence`] creates these, so every
/// instance holds 1..=10,000 characters from {A, C, G, T}.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidatedSequence(String);

impl ValidatedSequence {
    /// Wrap an already-normalized sequence. Callers must uphold the invariant.
    pub(crate) fn new_unchecked(sequence: String) -> Self {
        Self(sequence)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Number of bases
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// GC content as a percentage in [0, 100]
    #[must_use]
    pub fn gc_content(&self) -> f64 {
        metrics::gc_content(self.as_bytes())
    }

    #[must_use]
    pub fn composition(&self) -> BaseComposition {
        BaseComposition::from_sequence(self.as_bytes())
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ValidatedSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ValidatedSequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
