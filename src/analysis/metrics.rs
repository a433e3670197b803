//! Deterministic sequence statistics.

use serde::Serialize;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Per-base counts, gathered in a single pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BaseComposition {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
    /// Anything that is not A, C, G or T (case-insensitive)
    pub other: usize,
}

impl BaseComposition {
    #[must_use]
    pub fn from_sequence(sequence: &[u8]) -> Self {
        let mut composition = Self::default();
        for base in sequence {
            match base.to_ascii_uppercase() {
                b'A' => composition.a += 1,
                b'C' => composition.c += 1,
                b'G' => composition.g += 1,
                b'T' => composition.t += 1,
                _ => composition.other += 1,
            }
        }
        composition
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.a + self.c + self.g + self.t + self.other
    }

    #[must_use]
    pub fn gc_count(&self) -> usize {
        self.g + self.c
    }

    /// Percentage of G and C over all counted characters; 0 for an empty sequence
    #[must_use]
    pub fn gc_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        100.0 * count_to_f64(self.gc_count()) / count_to_f64(total)
    }
}

/// GC content of `sequence` as a percentage in [0, 100].
///
/// Total over all inputs: the empty sequence has 0% GC.
///
/// ```
/// use dna_analyzer::analysis::metrics::gc_content;
///
/// assert_eq!(gc_content(b"ACGT"), 50.0);
/// assert_eq!(gc_content(b""), 0.0);
/// ```
#[must_use]
pub fn gc_content(sequence: &[u8]) -> f64 {
    BaseComposition::from_sequence(sequence).gc_percent()
}
