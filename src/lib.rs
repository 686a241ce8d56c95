//! Threshold BLS signatures, with keys split by a verifiable dealer.
//!
//! A secret key is shared among `n` participants, such that any `t` of them
//! can produce a signature under the matching public key, while fewer than `t`
//! learn nothing about it. The private key itself never needs to exist in
//! a single place once it's been split.
//!
//! # Warning
//!
//! This library has not undergone any form of audit.
//!
//! # Design
//!
//! The secret is the constant term of a random polynomial `f` of degree `t - 1`,
//! and participant `i` holds `f(i)`. The dealer also publishes a commitment to
//! each coefficient of `f`, in the public group, which lets every participant
//! check that their share is consistent with everybody else's. This is
//! Feldman's verifiable secret sharing:
//! ```ignore
//! V[k] = a_k * G2
//! f(i) * G2 == Σ_k i^k V[k]
//! ```
//!
//! Signing is plain BLS with the share as a key: a participant hashes the
//! message onto the signature group, and multiplies the result by `f(i)`.
//! Since signing is linear in the key, any `t` signature shares can be combined
//! with the Lagrange coefficients of their participants, giving `f(0) * H(m)`,
//! the signature under the group key `f(0) * G2`.
//!
//! The flow is:
//!
//! - A dealer runs [deal], publishing the [VerificationVector], and sending
//! each [SecretShare] privately.
//! - Each participant checks their share with [verify], then wraps it into
//! a [ThresholdKeyShare].
//! - To sign, participants produce [SignatureShare]s, which anybody can
//! collect into a [SignatureShareSet], merging them into a [Signature].
//!
//! A failed check is reported by returning `false`, never as an error:
//! errors are reserved for misuse, like giving the wrong number of shares.
//!
//! # Generic Curves
//!
//! The library is generic over the curve, through the [BlsCurve] trait.
//! An implementation for BLS12-381, with public keys in G2 and signatures
//! in G1, is provided behind the `bls12_381` feature, enabled by default.
//!
//! # Randomness
//!
//! Functions needing randomness take it as an argument, so that callers,
//! and tests in particular, decide where it comes from.
mod compat;
mod dealer;
mod error;
mod keyshare;
mod lagrange;
mod math;
mod participants;
pub mod serde;
mod share_set;
mod sign;
#[cfg(test)]
mod test;
mod vss;

#[cfg(feature = "bls12_381")]
pub use compat::Bls12381;
pub use compat::BlsCurve;
pub use dealer::{deal, generate_sample_keys, Dealing};
pub use error::ThresholdError;
pub use keyshare::{PublicKey, PublicKeyShare, ThresholdKeyShare};
pub use lagrange::LagrangeCoefficients;
pub use math::Polynomial;
pub use participants::{Participant, ThresholdParameters};
pub use share_set::{SecretShareSet, Share, ShareSet, ShareSetState, SignatureShareSet};
pub use sign::{hash_message, MessageDigest, Signature, SignatureShare};
pub use vss::{verify, SecretShare, VerificationVector};
