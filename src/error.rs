use core::fmt;
use std::error;

use crate::participants::Participant;

/// Represents an error which can happen when sharing, signing or combining.
///
/// All of these signal a misuse by the caller: bad inputs, or operations
/// called in the wrong order. None of them are transient, so retrying the
/// same call will fail the same way.
///
/// A share failing its Feldman check, or a signature failing to verify,
/// is *not* an error: those predicates simply return `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    /// The threshold parameters don't satisfy `1 <= threshold <= total`.
    InvalidParameters { threshold: usize, total: usize },
    /// A polynomial with a zero constant term was used.
    DegenerateSecret,
    /// A participant index outside of `[1, total]` was used.
    InvalidParticipantIndex { participant: Participant, total: usize },
    /// Fewer than `threshold` participants were given for interpolation.
    InsufficientParticipants { have: usize, need: usize },
    /// Fewer than `threshold` shares are available to merge.
    InsufficientShares { have: usize, need: usize },
    /// The same participant appeared twice.
    DuplicateParticipant(Participant),
    /// A share set already holds `threshold` shares.
    CapacityExceeded { threshold: usize },
    /// A share set has already produced its result.
    AlreadyMerged,
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdError::InvalidParameters { threshold, total } => write!(
                f,
                "invalid parameters: threshold {} with {} participants",
                threshold, total
            ),
            ThresholdError::DegenerateSecret => write!(f, "polynomial has a zero secret"),
            ThresholdError::InvalidParticipantIndex { participant, total } => write!(
                f,
                "participant {} is outside of [1, {}]",
                u32::from(*participant),
                total
            ),
            ThresholdError::InsufficientParticipants { have, need } => {
                write!(f, "need {} participants, but only {} were given", need, have)
            }
            ThresholdError::InsufficientShares { have, need } => {
                write!(f, "need {} shares, but only {} are held", need, have)
            }
            ThresholdError::DuplicateParticipant(p) => {
                write!(f, "participant {} appears more than once", u32::from(*p))
            }
            ThresholdError::CapacityExceeded { threshold } => {
                write!(f, "already holding {} shares", threshold)
            }
            ThresholdError::AlreadyMerged => write!(f, "shares were already merged"),
        }
    }
}

impl error::Error for ThresholdError {}
