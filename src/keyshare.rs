use elliptic_curve::Group;
use serde::{Deserialize, Serialize};

use crate::{
    compat::BlsCurve,
    error::ThresholdError,
    participants::{Participant, ThresholdParameters},
    serde::{deserialize_point, deserialize_scalar, serialize_point, serialize_scalar},
    sign::{hash_digest, MessageDigest, Signature, SignatureShare},
    vss::SecretShare,
};

/// The share of the group private key held by one participant.
///
/// This is the only value in the scheme which needs to be kept secret,
/// which is why the scalar itself is never handed out: it can only be
/// used to sign, or to derive the matching public key share.
#[derive(Clone, Serialize, Deserialize)]
#[serde(bound = "", try_from = "RawKeyShare<C>")]
pub struct ThresholdKeyShare<C: BlsCurve> {
    participant: Participant,
    #[serde(serialize_with = "serialize_scalar")]
    secret: C::Scalar,
    parameters: ThresholdParameters,
}

#[derive(Deserialize)]
#[serde(bound = "")]
struct RawKeyShare<C: BlsCurve> {
    participant: Participant,
    #[serde(deserialize_with = "deserialize_scalar")]
    secret: C::Scalar,
    parameters: ThresholdParameters,
}

impl<C: BlsCurve> TryFrom<RawKeyShare<C>> for ThresholdKeyShare<C> {
    type Error = ThresholdError;

    fn try_from(raw: RawKeyShare<C>) -> Result<Self, Self::Error> {
        raw.parameters.check_participant(raw.participant)?;
        Ok(Self {
            participant: raw.participant,
            secret: raw.secret,
            parameters: raw.parameters,
        })
    }
}

impl<C: BlsCurve> core::fmt::Debug for ThresholdKeyShare<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThresholdKeyShare")
            .field("participant", &self.participant)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl<C: BlsCurve> ThresholdKeyShare<C> {
    /// Wrap a share received from a dealer.
    ///
    /// This will fail if the participant isn't in `[1, total]`.
    pub fn new(
        share: SecretShare<C>,
        parameters: ThresholdParameters,
    ) -> Result<Self, ThresholdError> {
        parameters.check_participant(share.participant())?;
        Ok(Self {
            participant: share.participant(),
            secret: *share.value(),
            parameters,
        })
    }

    /// Combine the contributions of several dealers into a single share.
    ///
    /// When every participant deals a polynomial, the key share of `participant`
    /// is the sum of the evaluations it received, including its own.
    pub fn from_contributions(
        participant: Participant,
        contributions: &[C::Scalar],
        parameters: ThresholdParameters,
    ) -> Result<Self, ThresholdError> {
        parameters.check_participant(participant)?;
        let secret = contributions.iter().sum();
        Ok(Self {
            participant,
            secret,
            parameters,
        })
    }

    pub fn participant(&self) -> Participant {
        self.participant
    }

    pub fn parameters(&self) -> &ThresholdParameters {
        &self.parameters
    }

    /// Sign a message digest, producing this participant's signature share.
    pub fn sign(&self, digest: &MessageDigest) -> SignatureShare<C> {
        let hash = hash_digest::<C>(digest);
        SignatureShare::new(self.participant, hash * self.secret)
    }

    /// The public key share matching this secret share.
    pub fn public_key_share(&self) -> PublicKeyShare<C> {
        PublicKeyShare::from_point(self.participant, C::PublicPoint::generator() * self.secret)
    }

    /// Expose the secret scalar, so that tests can reconstruct the group key.
    #[cfg(test)]
    pub(crate) fn secret(&self) -> C::Scalar {
        self.secret
    }
}

/// The public counterpart of a participant's key share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PublicKeyShare<C: BlsCurve> {
    participant: Participant,
    #[serde(serialize_with = "serialize_point", deserialize_with = "deserialize_point")]
    point: C::PublicPoint,
}

impl<C: BlsCurve> PublicKeyShare<C> {
    pub fn from_point(participant: Participant, point: C::PublicPoint) -> Self {
        Self { participant, point }
    }

    pub fn participant(&self) -> Participant {
        self.participant
    }

    pub fn point(&self) -> &C::PublicPoint {
        &self.point
    }

    /// Check a signature share produced by the owner of this key share.
    ///
    /// Shares claiming to come from another participant are rejected.
    #[must_use]
    pub fn verify(&self, digest: &MessageDigest, share: &SignatureShare<C>) -> bool {
        if share.participant() != self.participant {
            return false;
        }
        pairing_check::<C>(digest, share.point(), &self.point)
    }
}

/// The public key of the whole group.
///
/// This is the secret of the dealer's polynomial, lifted to the public group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PublicKey<C: BlsCurve> {
    #[serde(serialize_with = "serialize_point", deserialize_with = "deserialize_point")]
    point: C::PublicPoint,
}

impl<C: BlsCurve> PublicKey<C> {
    pub fn from_point(point: C::PublicPoint) -> Self {
        Self { point }
    }

    pub fn point(&self) -> &C::PublicPoint {
        &self.point
    }

    /// Verify a reconstructed signature over some digest.
    #[must_use]
    pub fn verify(&self, digest: &MessageDigest, signature: &Signature<C>) -> bool {
        pairing_check::<C>(digest, signature.point(), &self.point)
    }
}

/// Check that `e(sig, G) == e(H(digest), pk)`.
fn pairing_check<C: BlsCurve>(
    digest: &MessageDigest,
    sig: &C::SignaturePoint,
    public: &C::PublicPoint,
) -> bool {
    if bool::from(sig.is_identity()) || bool::from(public.is_identity()) {
        return false;
    }
    let hash = hash_digest::<C>(digest);
    C::pairing_eq(sig, &C::PublicPoint::generator(), &hash, public)
}

#[cfg(test)]
mod test {
    use bls12_381::Scalar;
    use elliptic_curve::Field;
    use rand_core::OsRng;

    use super::*;
    use crate::{
        compat::Bls12381,
        math::Polynomial,
        serde::{decode, encode},
        sign::hash_message,
    };

    #[test]
    fn test_index_out_of_range() {
        let params = ThresholdParameters::new(2, 3).unwrap();
        for bad in [0u32, 4, 100] {
            let share = SecretShare::<Bls12381>::new(Participant::from(bad), Scalar::ONE);
            assert_eq!(
                ThresholdKeyShare::new(share, params).unwrap_err(),
                ThresholdError::InvalidParticipantIndex {
                    participant: Participant::from(bad),
                    total: 3
                }
            );
        }
        let share = SecretShare::<Bls12381>::new(Participant::from(3u32), Scalar::ONE);
        assert!(ThresholdKeyShare::new(share, params).is_ok());
    }

    #[test]
    fn test_signature_shares_verify() {
        let params = ThresholdParameters::new(2, 3).unwrap();
        let f = Polynomial::<Bls12381>::generate(&mut OsRng, &params);
        let big_v = f.commit();
        let digest = hash_message(b"hello world");
        let other = hash_message(b"goodbye world");

        let keys: Vec<_> = f
            .secret_shares(&params)
            .unwrap()
            .into_iter()
            .map(|s| ThresholdKeyShare::new(s, params).unwrap())
            .collect();

        for key in &keys {
            let pk = key.public_key_share();
            assert_eq!(pk, big_v.public_key_share(key.participant()));

            let share = key.sign(&digest);
            assert_eq!(share.participant(), key.participant());
            assert!(pk.verify(&digest, &share));
            assert!(!pk.verify(&other, &share));
        }

        // A share is bound to the participant who produced it.
        let share = keys[0].sign(&digest);
        assert!(!keys[1].public_key_share().verify(&digest, &share));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let share = SecretShare::<Bls12381>::new(Participant::from(1u32), Scalar::from(11u64));
        let key = ThresholdKeyShare::new(share, ThresholdParameters::new(1, 1).unwrap()).unwrap();
        let digest = hash_message(b"msg");
        assert_eq!(key.sign(&digest), key.sign(&digest));
    }

    #[test]
    fn test_contributions_are_summed() {
        let params = ThresholdParameters::new(2, 2).unwrap();
        let p = Participant::from(2u32);
        let contributions = [Scalar::from(3u64), Scalar::from(4u64)];
        let key = ThresholdKeyShare::<Bls12381>::from_contributions(p, &contributions, params)
            .unwrap();
        assert_eq!(key.secret(), Scalar::from(7u64));
        assert!(ThresholdKeyShare::<Bls12381>::from_contributions(
            Participant::from(3u32),
            &contributions,
            params
        )
        .is_err());
    }

    #[test]
    fn test_decoding_checks_participant() {
        let params = ThresholdParameters::new(2, 3).unwrap();
        let share = SecretShare::<Bls12381>::new(Participant::from(3u32), Scalar::ONE);
        let key = ThresholdKeyShare::new(share, params).unwrap();
        let decoded: ThresholdKeyShare<Bls12381> = decode(&encode(&key)).unwrap();
        assert_eq!(decoded.participant(), key.participant());
        assert_eq!(decoded.secret(), Scalar::ONE);

        for bad in [0u32, 9] {
            let forged = ThresholdKeyShare::<Bls12381> {
                participant: Participant::from(bad),
                secret: Scalar::ONE,
                parameters: params,
            };
            assert!(decode::<ThresholdKeyShare<Bls12381>>(&encode(&forged)).is_err());
        }
    }

    #[test]
    fn test_debug_hides_secret() {
        let share = SecretShare::<Bls12381>::new(Participant::from(1u32), Scalar::from(11u64));
        let key = ThresholdKeyShare::new(share, ThresholdParameters::new(1, 1).unwrap()).unwrap();
        let out = format!("{:?}", key);
        assert!(out.contains("participant"));
        assert!(!out.contains("secret"));
    }
}
