use std::ops::Index;

use elliptic_curve::Field;
use rand_core::CryptoRngCore;

use crate::{
    compat::BlsCurve,
    error::ThresholdError,
    participants::{Participant, ThresholdParameters},
    vss::{SecretShare, VerificationVector},
};

/// Represents a polynomial with coefficients in the scalar field of the curve.
///
/// The constant term is the shared secret. A polynomial of `t` coefficients
/// has degree `t - 1`, so that `t` evaluations determine it.
#[derive(Debug, Clone)]
pub struct Polynomial<C: BlsCurve> {
    /// The coefficients of our polynomial, from 0..size-1.
    coefficients: Vec<C::Scalar>,
}

impl<C: BlsCurve> Polynomial<C> {
    /// Generate a random polynomial for some parameters.
    ///
    /// This will have `threshold` coefficients, with a nonzero constant term.
    pub fn generate(rng: &mut impl CryptoRngCore, params: &ThresholdParameters) -> Self {
        let mut coefficients = Vec::with_capacity(params.threshold());
        let secret = loop {
            let s = C::Scalar::random(&mut *rng);
            if !bool::from(s.is_zero()) {
                break s;
            }
        };
        coefficients.push(secret);
        for _ in 1..params.threshold() {
            coefficients.push(C::Scalar::random(&mut *rng));
        }
        tracing::trace!(size = coefficients.len(), "generated polynomial");
        Self { coefficients }
    }

    /// Create a polynomial from explicit coefficients, constant term first.
    ///
    /// No check is done here: a zero secret is only rejected upon evaluation.
    pub fn from_coefficients(coefficients: Vec<C::Scalar>) -> Self {
        Self { coefficients }
    }

    /// The number of coefficients, i.e. the threshold this polynomial serves.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[C::Scalar] {
        &self.coefficients
    }

    /// The constant term, which is the secret being shared.
    pub fn secret(&self) -> C::Scalar {
        self.coefficients
            .first()
            .copied()
            .unwrap_or(C::Scalar::ZERO)
    }

    fn check_secret(&self) -> Result<(), ThresholdError> {
        if bool::from(self.secret().is_zero()) {
            return Err(ThresholdError::DegenerateSecret);
        }
        Ok(())
    }

    /// Evaluate this polynomial at a point, using Horner's method.
    ///
    /// This fails on every call if the secret is zero.
    pub fn evaluate(&self, x: &C::Scalar) -> Result<C::Scalar, ThresholdError> {
        self.check_secret()?;
        let mut out = C::Scalar::ZERO;
        for c in self.coefficients.iter().rev() {
            out = out * x + c;
        }
        Ok(out)
    }

    /// Evaluate this polynomial at the point of some participant.
    pub fn evaluate_at(&self, participant: Participant) -> Result<C::Scalar, ThresholdError> {
        self.evaluate(&participant.scalar())
    }

    /// Evaluate this polynomial at `1, 2, ..., total`.
    ///
    /// The value at index `i` belongs to participant `i + 1`.
    pub fn secret_key_contribution(&self, total: usize) -> Result<Vec<C::Scalar>, ThresholdError> {
        self.check_secret()?;
        (1..=total as u64)
            .map(|i| self.evaluate(&C::Scalar::from(i)))
            .collect()
    }

    /// Produce the share of every participant.
    pub fn secret_shares(
        &self,
        params: &ThresholdParameters,
    ) -> Result<Vec<SecretShare<C>>, ThresholdError> {
        params
            .participants()
            .map(|p| Ok(SecretShare::new(p, self.evaluate_at(p)?)))
            .collect()
    }

    /// Commit to this polynomial, producing a Feldman verification vector.
    pub fn commit(&self) -> VerificationVector<C> {
        VerificationVector::from_polynomial(self)
    }
}

impl<C: BlsCurve> Index<usize> for Polynomial<C> {
    type Output = C::Scalar;

    fn index(&self, i: usize) -> &Self::Output {
        &self.coefficients[i]
    }
}

#[cfg(test)]
mod test {
    use bls12_381::Scalar;
    use rand_core::OsRng;

    use super::*;
    use crate::compat::Bls12381;

    fn poly(coefficients: &[u64]) -> Polynomial<Bls12381> {
        Polynomial::from_coefficients(coefficients.iter().map(|&c| Scalar::from(c)).collect())
    }

    #[test]
    fn test_evaluate() {
        let f = poly(&[1, 0, 1]);
        assert_eq!(f.evaluate(&Scalar::from(5u64)), Ok(Scalar::from(26u64)));
        assert_eq!(f.evaluate(&Scalar::ZERO), Ok(Scalar::ONE));
    }

    #[test]
    fn test_zero_secret_is_rejected_everywhere() {
        let f = poly(&[0, 1, 0]);
        for x in [0u64, 1, 5, 1000] {
            assert_eq!(
                f.evaluate(&Scalar::from(x)),
                Err(ThresholdError::DegenerateSecret)
            );
        }
        assert_eq!(
            f.secret_key_contribution(3),
            Err(ThresholdError::DegenerateSecret)
        );
        assert_eq!(
            poly(&[]).evaluate(&Scalar::ONE),
            Err(ThresholdError::DegenerateSecret)
        );
    }

    #[test]
    fn test_secret_key_contribution_indices() {
        let f = poly(&[3, 2]);
        let shares = f.secret_key_contribution(4).unwrap();
        let expected: Vec<Scalar> = [5u64, 7, 9, 11].iter().map(|&x| Scalar::from(x)).collect();
        assert_eq!(shares, expected);

        let params = ThresholdParameters::new(2, 4).unwrap();
        let tagged = f.secret_shares(&params).unwrap();
        for (i, share) in tagged.iter().enumerate() {
            assert_eq!(u32::from(share.participant()), i as u32 + 1);
            assert_eq!(*share.value(), expected[i]);
        }
    }

    #[test]
    fn test_generate() {
        let params = ThresholdParameters::new(3, 5).unwrap();
        let f = Polynomial::<Bls12381>::generate(&mut OsRng, &params);
        assert_eq!(f.len(), 3);
        assert!(!bool::from(f[0].is_zero()));
        assert_eq!(f.secret(), f[0]);
        assert!(f.evaluate(&Scalar::ONE).is_ok());
    }
}
