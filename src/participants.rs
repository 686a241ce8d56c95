//! This module holds the types identifying participants, and the parameters
//! of a threshold scheme.

use elliptic_curve::PrimeField;
use serde::{Deserialize, Serialize};

use crate::error::ThresholdError;

/// Represents a participant in the scheme.
///
/// Participants are identified by their index, starting at 1, which is also
/// the point their share of the polynomial is evaluated at. Index 0 is
/// reserved for the secret itself, and is never a valid participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Participant(u32);

impl Participant {
    /// Return the scalar associated with this participant.
    pub fn scalar<F: PrimeField>(&self) -> F {
        F::from(u64::from(self.0))
    }
}

impl From<Participant> for u32 {
    fn from(p: Participant) -> Self {
        p.0
    }
}

impl From<u32> for Participant {
    fn from(x: u32) -> Self {
        Participant(x)
    }
}

/// The threshold `t` and total number of participants `n` of a scheme.
///
/// Any `t` of the `n` participants can act together, fewer learn nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct ThresholdParameters {
    threshold: usize,
    total: usize,
}

#[derive(Deserialize)]
struct RawParameters {
    threshold: usize,
    total: usize,
}

impl TryFrom<RawParameters> for ThresholdParameters {
    type Error = ThresholdError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(raw.threshold, raw.total)
    }
}

impl ThresholdParameters {
    /// Create new parameters, checking that `1 <= threshold <= total`.
    ///
    /// The total also has to fit into a participant index.
    pub fn new(threshold: usize, total: usize) -> Result<Self, ThresholdError> {
        if threshold == 0 || threshold > total || u32::try_from(total).is_err() {
            return Err(ThresholdError::InvalidParameters { threshold, total });
        }
        Ok(Self { threshold, total })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Check that a participant lies in `[1, total]`.
    pub fn check_participant(&self, participant: Participant) -> Result<(), ThresholdError> {
        let i = participant.0 as usize;
        if i == 0 || i > self.total {
            return Err(ThresholdError::InvalidParticipantIndex {
                participant,
                total: self.total,
            });
        }
        Ok(())
    }

    /// Iterate over every participant, in order.
    pub fn participants(&self) -> impl Iterator<Item = Participant> {
        // new() checked that total fits into a u32.
        (1..=self.total as u32).map(Participant)
    }
}
