//! Feldman verifiable secret sharing.
//!
//! A dealer sharing the constant term of a polynomial `f` publishes
//! a commitment to every coefficient:
//! ```ignore
//! V[k] = a_k * G
//! ```
//! where `G` generates the public group. Because scalar multiplication is
//! a homomorphism, anybody can compute `f(i) * G` from `V` alone, and
//! a participant receiving the share `x_i` checks that `x_i * G` matches.
//! This detects a dealer handing out inconsistent shares, without revealing
//! anything beyond `f(0) * G`, which is the group public key.
use elliptic_curve::Group;
use serde::{Deserialize, Serialize};

use crate::{
    compat::{self, BlsCurve},
    keyshare::{PublicKey, PublicKeyShare},
    math::Polynomial,
    participants::Participant,
    serde::{deserialize_points, deserialize_scalar, serialize_points, serialize_scalar},
};

/// The share of a secret a dealer sends to one participant.
///
/// This is the dealer's polynomial evaluated at the participant's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SecretShare<C: BlsCurve> {
    participant: Participant,
    #[serde(
        serialize_with = "serialize_scalar",
        deserialize_with = "deserialize_scalar"
    )]
    value: C::Scalar,
}

impl<C: BlsCurve> SecretShare<C> {
    pub fn new(participant: Participant, value: C::Scalar) -> Self {
        Self { participant, value }
    }

    pub fn participant(&self) -> Participant {
        self.participant
    }

    pub fn value(&self) -> &C::Scalar {
        &self.value
    }

    /// Check this share against the commitments the dealer published.
    #[must_use]
    pub fn verify(&self, vector: &VerificationVector<C>) -> bool {
        verify(self.participant, &self.value, vector)
    }
}

/// The public commitment to a dealer's polynomial.
///
/// This contains one point in the public group for every coefficient,
/// in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct VerificationVector<C: BlsCurve> {
    #[serde(
        serialize_with = "serialize_points",
        deserialize_with = "deserialize_points"
    )]
    points: Vec<C::PublicPoint>,
}

impl<C: BlsCurve> VerificationVector<C> {
    /// Commit to every coefficient of a polynomial.
    pub fn from_polynomial(poly: &Polynomial<C>) -> Self {
        let points = poly
            .coefficients()
            .iter()
            .map(|a| C::PublicPoint::generator() * a)
            .collect();
        Self { points }
    }

    /// Create a vector from points received from a dealer.
    pub fn from_points(points: Vec<C::PublicPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[C::PublicPoint] {
        &self.points
    }

    /// The threshold of the polynomial this commits to.
    pub fn threshold(&self) -> usize {
        self.points.len()
    }

    /// Evaluate the committed polynomial "in the exponent" at some point.
    fn evaluate(&self, x: &C::Scalar) -> C::PublicPoint {
        let mut out = C::PublicPoint::identity();
        for c in self.points.iter().rev() {
            out = out * x + c;
        }
        out
    }

    /// The public key corresponding to the shared secret.
    pub fn public_key(&self) -> PublicKey<C> {
        let point = self
            .points
            .first()
            .copied()
            .unwrap_or_else(C::PublicPoint::identity);
        PublicKey::from_point(point)
    }

    /// The public key share every honest participant's share maps to.
    ///
    /// This lets anyone check signature shares knowing only the commitments.
    pub fn public_key_share(&self, participant: Participant) -> PublicKeyShare<C> {
        PublicKeyShare::from_point(participant, self.evaluate(&participant.scalar()))
    }

    /// Sum the commitments of several dealers, coefficient by coefficient.
    ///
    /// The result commits to the sum of their polynomials, whose shares are
    /// the sum of the shares each dealer handed out. Vectors of different
    /// lengths are padded with the identity.
    pub fn aggregate<'a>(vectors: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut points: Vec<C::PublicPoint> = Vec::new();
        for v in vectors {
            if v.points.len() > points.len() {
                points.resize(v.points.len(), C::PublicPoint::identity());
            }
            for (acc, p) in points.iter_mut().zip(v.points.iter()) {
                *acc += p;
            }
        }
        Self { points }
    }
}

/// Check a share a participant received against a verification vector.
///
/// This returns `true` if and only if `share * G` matches the commitments
/// evaluated at the participant's index. A `false` result means the dealer,
/// or whoever relayed the share, misbehaved: it's not an error.
#[must_use]
pub fn verify<C: BlsCurve>(
    participant: Participant,
    share: &C::Scalar,
    vector: &VerificationVector<C>,
) -> bool {
    if vector.points.is_empty() || u32::from(participant) == 0 {
        return false;
    }
    let expected = vector.evaluate(&participant.scalar());
    let actual = C::PublicPoint::generator() * share;
    let ok = compat::ct_eq(&actual, &expected);
    if !ok {
        tracing::debug!(
            participant = u32::from(participant),
            "share does not match verification vector"
        );
    }
    ok
}
