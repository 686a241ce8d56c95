//! Collecting shares until they can be combined.
//!
//! A [ShareSet] accumulates the shares of one value, one per participant,
//! until it holds exactly `threshold` of them, at which point it can merge
//! them with Lagrange interpolation. The same machinery works for signature
//! shares, combining into a [Signature], and for secret key shares, combining
//! into the group private key, since both are linear in the shared secret.
//!
//! A set has no internal locking: if shares arrive from several threads,
//! wrap it in a mutex.
use std::{collections::BTreeMap, iter::Sum, marker::PhantomData, ops::Mul};

use crate::{
    compat::BlsCurve,
    error::ThresholdError,
    lagrange::LagrangeCoefficients,
    participants::{Participant, ThresholdParameters},
    sign::{Signature, SignatureShare},
    vss::SecretShare,
};

/// Something a participant holds a share of, which can be combined.
pub trait Share<C: BlsCurve> {
    /// The value being interpolated.
    type Value: Copy + Mul<C::Scalar, Output = Self::Value> + Sum<Self::Value>;
    /// What merging produces.
    type Output;

    fn participant(&self) -> Participant;

    fn value(&self) -> Self::Value;

    fn output(value: Self::Value) -> Self::Output;
}

impl<C: BlsCurve> Share<C> for SignatureShare<C> {
    type Value = C::SignaturePoint;
    type Output = Signature<C>;

    fn participant(&self) -> Participant {
        SignatureShare::participant(self)
    }

    fn value(&self) -> Self::Value {
        *self.point()
    }

    fn output(value: Self::Value) -> Self::Output {
        Signature::from_point(value)
    }
}

impl<C: BlsCurve> Share<C> for SecretShare<C> {
    type Value = C::Scalar;
    type Output = C::Scalar;

    fn participant(&self) -> Participant {
        SecretShare::participant(self)
    }

    fn value(&self) -> Self::Value {
        *SecretShare::value(self)
    }

    fn output(value: Self::Value) -> Self::Output {
        value
    }
}

/// The state a share set is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareSetState {
    /// Fewer than `threshold` shares are held.
    Collecting,
    /// Exactly `threshold` shares are held, and can be merged.
    Ready,
    /// The shares have been merged, no more can be added.
    Merged,
}

/// Accumulates the shares of a single value.
#[derive(Debug, Clone)]
pub struct ShareSet<C: BlsCurve, S: Share<C>> {
    params: ThresholdParameters,
    shares: BTreeMap<Participant, S::Value>,
    merged: Option<S::Value>,
    _curve: PhantomData<C>,
}

/// Accumulates signature shares for one message.
pub type SignatureShareSet<C> = ShareSet<C, SignatureShare<C>>;

/// Accumulates secret key shares, to reconstruct the group private key.
pub type SecretShareSet<C> = ShareSet<C, SecretShare<C>>;

impl<C: BlsCurve, S: Share<C>> ShareSet<C, S> {
    pub fn new(params: ThresholdParameters) -> Self {
        Self {
            params,
            shares: BTreeMap::new(),
            merged: None,
            _curve: PhantomData,
        }
    }

    pub fn state(&self) -> ShareSetState {
        if self.merged.is_some() {
            ShareSetState::Merged
        } else if self.shares.len() < self.params.threshold() {
            ShareSetState::Collecting
        } else {
            ShareSetState::Ready
        }
    }

    /// The number of shares held.
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Check if a participant already provided a share.
    pub fn contains(&self, participant: Participant) -> bool {
        self.shares.contains_key(&participant)
    }

    /// Add the share of a new participant.
    ///
    /// Once `threshold` shares are held, further shares are refused rather
    /// than ignored, since sending them is a mistake on the caller's side.
    pub fn add_share(&mut self, share: S) -> Result<(), ThresholdError> {
        if self.merged.is_some() {
            return Err(ThresholdError::AlreadyMerged);
        }
        let participant = share.participant();
        self.params.check_participant(participant)?;
        if self.shares.contains_key(&participant) {
            return Err(ThresholdError::DuplicateParticipant(participant));
        }
        if self.shares.len() >= self.params.threshold() {
            return Err(ThresholdError::CapacityExceeded {
                threshold: self.params.threshold(),
            });
        }
        self.shares.insert(participant, share.value());
        tracing::trace!(
            participant = u32::from(participant),
            held = self.shares.len(),
            "added share"
        );
        Ok(())
    }

    /// Merge the shares held into the value they're shares of.
    ///
    /// This can only be called once, use [ShareSet::merged] to get the
    /// result again afterwards.
    pub fn merge(&mut self) -> Result<S::Output, ThresholdError> {
        match self.state() {
            ShareSetState::Merged => return Err(ThresholdError::AlreadyMerged),
            ShareSetState::Collecting => {
                return Err(ThresholdError::InsufficientShares {
                    have: self.shares.len(),
                    need: self.params.threshold(),
                })
            }
            ShareSetState::Ready => {}
        }
        let participants: Vec<Participant> = self.shares.keys().copied().collect();
        let lagrange = LagrangeCoefficients::<C>::new(&self.params, &participants)?;
        let value = lagrange.interpolate(&self.shares)?;
        self.merged = Some(value);
        tracing::debug!(shares = participants.len(), "merged shares");
        Ok(S::output(value))
    }

    /// The result of a previous merge, if any.
    pub fn merged(&self) -> Option<S::Output> {
        self.merged.map(S::output)
    }
}
