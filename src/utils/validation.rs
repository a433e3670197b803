//! Centralized sequence validation.

use crate::core::sequence::ValidatedSequence;

/// Maximum number of bases accepted in a single request.
///
/// This is a service cap for the demo deployment, not a biological limit.
pub const MAX_SEQUENCE_LENGTH: usize = 10_000;

/// Nucleotide alphabet accepted by the validator (compared case-insensitively).
pub const NUCLEOTIDES: [u8; 4] = *b"ACGT";

/// Sequence validation error types
///
/// The `Display` text of each variant is the exact message returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("DNA sequence is required")]
    EmptySequence,
    #[error("Invalid DNA sequence. Only A, C, G, T are allowed")]
    InvalidCharacter,
    #[error("Sequence too long. Maximum 10,000 base pairs for demo")]
    TooLong,
}

/// Returns true if `c` is one of A, C, G, T in either case.
#[must_use]
pub fn is_nucleotide(c: char) -> bool {
    c.is_ascii() && NUCLEOTIDES.contains(&(c as u8).to_ascii_uppercase())
}

/// Validate a raw sequence and normalize it to upper case.
///
/// Checks run in a fixed order so the caller always sees the most basic
/// problem first:
/// 1. Empty (or whitespace-only) input
/// 2. Characters outside {A, C, G, T}, case-insensitive
/// 3. Length above [`MAX_SEQUENCE_LENGTH`]
///
/// # Examples
///
/// ```
/// use dna_analyzer::utils::validation::{validate_sequence, ValidationError};
///
/// assert_eq!(validate_sequence("acgt").unwrap().as_str(), "ACGT");
/// assert_eq!(validate_sequence("ACGTX"), Err(ValidationError::InvalidCharacter));
/// assert_eq!(validate_sequence(""), Err(ValidationError::EmptySequence));
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptySequence`, `ValidationError::InvalidCharacter`
/// or `ValidationError::TooLong` as described above.
pub fn validate_sequence(raw: &str) -> Result<ValidatedSequence, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptySequence);
    }

    if !raw.chars().all(is_nucleotide) {
        return Err(ValidationError::InvalidCharacter);
    }

    // Only ASCII remains at this point, so byte length equals base count
    if raw.len() > MAX_SEQUENCE_LENGTH {
        return Err(ValidationError::TooLong);
    }

    Ok(ValidatedSequence::new_unchecked(raw.to_ascii_uppercase()))
}
