use core::fmt::Debug;

use elliptic_curve::{group::GroupEncoding, Group, PrimeField};
use subtle::ConstantTimeEq;

#[cfg(any(feature = "bls12_381", test))]
mod bls12_381_impl;

#[cfg(any(feature = "bls12_381", test))]
pub use bls12_381_impl::Bls12381;

/// Represents a pairing-friendly curve suitable for threshold BLS.
///
/// This is the trait that any curve usable in this library must implement.
/// The crate provides a feature-gated implementation for BLS12-381,
/// beyond that you'll need to implement this trait yourself.
///
/// The scheme uses two groups sharing one scalar field:
/// - the *public* group, holding public keys and Feldman commitments,
/// - the *signature* group, holding message hashes and signatures.
///
/// Both groups need a canonical byte encoding, which is used by serde, and
/// constant-time equality, which is used by every verification predicate.
///
/// Implementors are marker types, which is why we ask for all the cheap
/// derivable traits: this lets the types of this crate derive them too.
pub trait BlsCurve: Clone + Copy + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// A name for the curve, used for domain separation.
    const NAME: &'static [u8];

    /// The prime order scalar field shared by both groups.
    type Scalar: PrimeField;

    /// The group public keys and commitments live in.
    type PublicPoint: Group<Scalar = Self::Scalar> + GroupEncoding + ConstantTimeEq;

    /// The group message hashes and signatures live in.
    type SignaturePoint: Group<Scalar = Self::Scalar> + GroupEncoding + ConstantTimeEq;

    /// Hash arbitrary bytes onto the signature group.
    ///
    /// This has to be deterministic, and nobody may learn the discrete
    /// logarithm of the output.
    fn hash_to_signature_group(msg: &[u8]) -> Self::SignaturePoint;

    /// Check that `e(a1, b1) == e(a2, b2)`.
    fn pairing_eq(
        a1: &Self::SignaturePoint,
        b1: &Self::PublicPoint,
        a2: &Self::SignaturePoint,
        b2: &Self::PublicPoint,
    ) -> bool;
}

/// Compare two group elements without branching on their contents.
pub(crate) fn ct_eq<G: ConstantTimeEq>(a: &G, b: &G) -> bool {
    a.ct_eq(b).into()
}
