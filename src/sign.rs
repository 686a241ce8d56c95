use digest::Digest;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{
    compat::BlsCurve,
    participants::Participant,
    serde::{deserialize_point, serialize_point},
};

/// The fixed size digest of a message, which is what actually gets signed.
pub type MessageDigest = [u8; 32];

/// Hash an arbitrary message into a digest suitable for signing.
pub fn hash_message(msg: &[u8]) -> MessageDigest {
    Sha256::digest(msg).into()
}

/// Map a digest onto the signature group.
pub(crate) fn hash_digest<C: BlsCurve>(digest: &MessageDigest) -> C::SignaturePoint {
    C::hash_to_signature_group(digest)
}

/// A signature share, produced by a single participant.
///
/// This is the participant's key share times the hash of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SignatureShare<C: BlsCurve> {
    participant: Participant,
    #[serde(serialize_with = "serialize_point", deserialize_with = "deserialize_point")]
    point: C::SignaturePoint,
}

impl<C: BlsCurve> SignatureShare<C> {
    pub fn new(participant: Participant, point: C::SignaturePoint) -> Self {
        Self { participant, point }
    }

    pub fn participant(&self) -> Participant {
        self.participant
    }

    pub fn point(&self) -> &C::SignaturePoint {
        &self.point
    }
}

/// A complete signature, reconstructed from enough signature shares.
///
/// This is indistinguishable from a signature made with the group private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Signature<C: BlsCurve> {
    #[serde(serialize_with = "serialize_point", deserialize_with = "deserialize_point")]
    point: C::SignaturePoint,
}

impl<C: BlsCurve> Signature<C> {
    pub fn from_point(point: C::SignaturePoint) -> Self {
        Self { point }
    }

    pub fn point(&self) -> &C::SignaturePoint {
        &self.point
    }
}
