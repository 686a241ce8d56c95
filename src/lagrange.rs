//! Lagrange interpolation at zero.
//!
//! Given the evaluations `f(x_i)` of a polynomial of degree `t - 1` at `t`
//! distinct points, its constant term is:
//! ```ignore
//! f(0) = Σ_i λ_i f(x_i),    λ_i = Π_{j≠i} x_j / (x_j - x_i)
//! ```
//! The coefficients `λ_i` only depend on the points, so they can be computed
//! once and applied to anything linear in `f`: the key shares themselves, their
//! lifts to the public group, or signature shares.
use std::{collections::BTreeMap, iter::Sum, ops::Mul};

use elliptic_curve::Field;

use crate::{
    compat::BlsCurve,
    error::ThresholdError,
    participants::{Participant, ThresholdParameters},
};

/// The Lagrange coefficients of a set of participants.
///
/// Participants are kept in sorted order, so the same set always yields
/// the same coefficients, regardless of the order it was presented in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagrangeCoefficients<C: BlsCurve> {
    coefficients: Vec<(Participant, C::Scalar)>,
}

impl<C: BlsCurve> LagrangeCoefficients<C> {
    /// Compute the coefficients for a set of participants.
    ///
    /// At least `threshold` distinct participants in `[1, total]` must be given.
    /// If there are more, only the `threshold` smallest indices are used.
    pub fn new(
        params: &ThresholdParameters,
        participants: &[Participant],
    ) -> Result<Self, ThresholdError> {
        let need = params.threshold();
        if participants.len() < need {
            return Err(ThresholdError::InsufficientParticipants {
                have: participants.len(),
                need,
            });
        }

        let mut sorted = participants.to_owned();
        sorted.sort();
        for (i, &p) in sorted.iter().enumerate() {
            params.check_participant(p)?;
            if i > 0 && sorted[i - 1] == p {
                return Err(ThresholdError::DuplicateParticipant(p));
            }
        }
        sorted.truncate(need);

        let domain: Vec<C::Scalar> = sorted.iter().map(|p| p.scalar()).collect();
        let mut coefficients = Vec::with_capacity(need);
        for (i, &p) in sorted.iter().enumerate() {
            let x_i = domain[i];
            let mut num = C::Scalar::ONE;
            let mut den = C::Scalar::ONE;
            for (j, x_j) in domain.iter().enumerate() {
                if i == j {
                    continue;
                }
                num *= x_j;
                den *= *x_j - x_i;
            }
            // The indices are distinct and nonzero, so this always succeeds.
            let den_inv: Option<C::Scalar> = den.invert().into();
            let den_inv = den_inv.ok_or(ThresholdError::DuplicateParticipant(p))?;
            coefficients.push((p, num * den_inv));
        }
        tracing::trace!(participants = need, "computed lagrange coefficients");

        Ok(Self { coefficients })
    }

    /// The participants whose values get combined, in increasing order.
    pub fn participants(&self) -> impl Iterator<Item = Participant> + '_ {
        self.coefficients.iter().map(|(p, _)| *p)
    }

    /// Get the coefficient of a participant, if they're part of this set.
    pub fn coefficient(&self, participant: Participant) -> Option<C::Scalar> {
        self.coefficients
            .iter()
            .find(|(p, _)| *p == participant)
            .map(|(_, c)| *c)
    }

    /// Iterate over each participant along with their coefficient.
    pub fn iter(&self) -> impl Iterator<Item = (Participant, C::Scalar)> + '_ {
        self.coefficients.iter().copied()
    }

    /// Compute `Σ λ_i v_i`, for each participant in this set.
    ///
    /// This works for anything we can multiply by a scalar and add together,
    /// which covers both scalars and group elements.
    /// Values of participants outside this set are ignored.
    pub fn interpolate<T>(&self, values: &BTreeMap<Participant, T>) -> Result<T, ThresholdError>
    where
        T: Copy + Mul<C::Scalar, Output = T> + Sum<T>,
    {
        let have = self
            .participants()
            .filter(|p| values.contains_key(p))
            .count();
        if have < self.coefficients.len() {
            return Err(ThresholdError::InsufficientShares {
                have,
                need: self.coefficients.len(),
            });
        }
        Ok(self
            .coefficients
            .iter()
            .filter_map(|(p, lambda)| values.get(p).map(|v| *v * *lambda))
            .sum())
    }
}
