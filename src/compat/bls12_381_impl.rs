use bls12_381::{
    hash_to_curve::{ExpandMsgXmd, HashToCurve},
    pairing, G1Affine, G1Projective, G2Affine, G2Projective, Scalar,
};
// bls12_381 0.8 builds its XMD expander on digest 0.9.
use sha2_09::Sha256;

use super::BlsCurve;

/// Domain separation tag for hashing messages onto G1.
const HASH_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// The BLS12-381 curve, with public keys in G2 and signatures in G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bls12381;

impl BlsCurve for Bls12381 {
    const NAME: &'static [u8] = b"BLS12-381";

    type Scalar = Scalar;
    type PublicPoint = G2Projective;
    type SignaturePoint = G1Projective;

    fn hash_to_signature_group(msg: &[u8]) -> Self::SignaturePoint {
        <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(msg, HASH_DST)
    }

    fn pairing_eq(
        a1: &Self::SignaturePoint,
        b1: &Self::PublicPoint,
        a2: &Self::SignaturePoint,
        b2: &Self::PublicPoint,
    ) -> bool {
        let lhs = pairing(&G1Affine::from(a1), &G2Affine::from(b1));
        let rhs = pairing(&G1Affine::from(a2), &G2Affine::from(b2));
        lhs == rhs
    }
}
