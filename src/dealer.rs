//! Helpers for a trusted dealer.
//!
//! A dealer samples a polynomial, and hands out one evaluation to each
//! participant, along with a public commitment to the polynomial. This lets
//! every participant check their share, but the dealer still learns the
//! secret, and has to be trusted to forget it afterwards.
//!
//! To avoid that, every participant can act as a dealer for their own
//! polynomial, and each participant sums what they received, with
//! [ThresholdKeyShare::from_contributions] and [VerificationVector::aggregate].
use rand_core::CryptoRngCore;

use crate::{
    compat::BlsCurve,
    error::ThresholdError,
    keyshare::{PublicKey, ThresholdKeyShare},
    math::Polynomial,
    participants::ThresholdParameters,
    vss::{SecretShare, VerificationVector},
};

/// Everything a single dealer produces.
#[derive(Debug, Clone)]
pub struct Dealing<C: BlsCurve> {
    /// The polynomial whose constant term is being shared.
    ///
    /// This is secret, and should be discarded once the shares are sent.
    pub polynomial: Polynomial<C>,
    /// The public commitment to the polynomial, to publish.
    pub verification_vector: VerificationVector<C>,
    /// One share per participant, in order, to send privately.
    pub shares: Vec<SecretShare<C>>,
}

impl<C: BlsCurve> Dealing<C> {
    /// The public key of the secret being shared.
    pub fn public_key(&self) -> PublicKey<C> {
        self.verification_vector.public_key()
    }
}

/// Sample a new secret, and split it into shares for each participant.
pub fn deal<C: BlsCurve>(
    rng: &mut impl CryptoRngCore,
    params: &ThresholdParameters,
) -> Result<Dealing<C>, ThresholdError> {
    let polynomial = Polynomial::generate(rng, params);
    let verification_vector = polynomial.commit();
    let shares = polynomial.secret_shares(params)?;
    tracing::trace!(
        threshold = params.threshold(),
        total = params.total(),
        "dealt shares"
    );
    Ok(Dealing {
        polynomial,
        verification_vector,
        shares,
    })
}

/// Generate a full set of key shares, along with the polynomial behind them.
///
/// This is mainly useful for testing, where a single party plays every role.
pub fn generate_sample_keys<C: BlsCurve>(
    rng: &mut impl CryptoRngCore,
    params: &ThresholdParameters,
) -> Result<(Vec<ThresholdKeyShare<C>>, Polynomial<C>), ThresholdError> {
    let dealing = deal::<C>(rng, params)?;
    let keys = dealing
        .shares
        .into_iter()
        .map(|s| ThresholdKeyShare::new(s, *params))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((keys, dealing.polynomial))
}

#[cfg(test)]
mod test {
    use magikitten::MeowRng;
    use rand_core::OsRng;

    use super::*;
    use crate::compat::Bls12381;

    #[test]
    fn test_dealing_is_consistent() {
        let params = ThresholdParameters::new(3, 5).unwrap();
        let dealing = deal::<Bls12381>(&mut OsRng, &params).unwrap();
        assert_eq!(dealing.shares.len(), 5);
        assert_eq!(dealing.verification_vector.threshold(), 3);
        for share in &dealing.shares {
            assert!(share.verify(&dealing.verification_vector));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let params = ThresholdParameters::new(2, 3).unwrap();
        let (keys0, f0) =
            generate_sample_keys::<Bls12381>(&mut MeowRng::new(&[7u8; 32]), &params).unwrap();
        let (keys1, f1) =
            generate_sample_keys::<Bls12381>(&mut MeowRng::new(&[7u8; 32]), &params).unwrap();
        let (_, f2) =
            generate_sample_keys::<Bls12381>(&mut MeowRng::new(&[8u8; 32]), &params).unwrap();
        assert_eq!(f0.coefficients(), f1.coefficients());
        assert_ne!(f0.coefficients(), f2.coefficients());
        for (k0, k1) in keys0.iter().zip(keys1.iter()) {
            assert_eq!(k0.participant(), k1.participant());
            assert_eq!(k0.secret(), k1.secret());
        }
    }

    #[test]
    fn test_independent_dealers_combine() {
        let params = ThresholdParameters::new(2, 3).unwrap();
        let dealings: Vec<_> = (0..3)
            .map(|_| deal::<Bls12381>(&mut OsRng, &params).unwrap())
            .collect();
        let vectors: Vec<_> = dealings.iter().map(|d| d.verification_vector.clone()).collect();
        let combined = VerificationVector::aggregate(&vectors);

        for (i, p) in params.participants().enumerate() {
            let received: Vec<_> = dealings.iter().map(|d| *d.shares[i].value()).collect();
            let key = ThresholdKeyShare::from_contributions(p, &received, params).unwrap();
            assert_eq!(key.public_key_share(), combined.public_key_share(p));
        }
    }
}
