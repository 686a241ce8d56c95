use std::sync::Mutex;

use easy_parallel::Parallel;
use elliptic_curve::Field;
use rand_core::{OsRng, RngCore};

use crate::{
    compat::Bls12381,
    generate_sample_keys, hash_message,
    serde::{decode, encode},
    Participant, Signature, SignatureShare, SignatureShareSet, ThresholdKeyShare,
    ThresholdParameters,
};

/// Pick `count` distinct signers out of `1..=total`, in a random order.
fn choose_signers(count: usize, total: usize) -> Vec<Participant> {
    let mut all: Vec<u32> = (1..=total as u32).collect();
    while all.len() > count {
        let i = OsRng.next_u32() as usize % all.len();
        all.remove(i);
    }
    for i in (1..all.len()).rev() {
        let j = OsRng.next_u32() as usize % (i + 1);
        all.swap(i, j);
    }
    all.into_iter().map(Participant::from).collect()
}

fn sign_with(
    keys: &[ThresholdKeyShare<Bls12381>],
    signers: &[Participant],
    params: ThresholdParameters,
    msg: &[u8],
) -> Signature<Bls12381> {
    let digest = hash_message(msg);
    let mut set = SignatureShareSet::new(params);
    for p in signers {
        let key = &keys[u32::from(*p) as usize - 1];
        set.add_share(key.sign(&digest)).unwrap();
    }
    set.merge().unwrap()
}

#[test]
fn test_e2e() {
    let params = ThresholdParameters::new(3, 5).unwrap();
    let dealing = crate::deal::<Bls12381>(&mut OsRng, &params).unwrap();
    let public_key = dealing.public_key();

    // Shares go over the wire, and get checked on arrival.
    let keys: Vec<ThresholdKeyShare<Bls12381>> = dealing
        .shares
        .iter()
        .map(|s| {
            let received = decode(&encode(s)).unwrap();
            assert!(crate::verify(
                s.participant(),
                s.value(),
                &dealing.verification_vector
            ));
            ThresholdKeyShare::new(received, params).unwrap()
        })
        .collect();

    let msg = b"hello world";
    let digest = hash_message(msg);

    let mut set = SignatureShareSet::new(params);
    for key in keys.iter().rev().take(3) {
        let share = key.sign(&digest);
        let share: SignatureShare<Bls12381> = decode(&encode(&share)).unwrap();
        assert!(key.public_key_share().verify(&digest, &share));
        set.add_share(share).unwrap();
    }
    let signature = set.merge().unwrap();

    assert!(public_key.verify(&digest, &signature));
    assert!(!public_key.verify(&hash_message(b"goodbye world"), &signature));

    let decoded: Signature<Bls12381> = decode(&encode(&signature)).unwrap();
    assert_eq!(decoded, signature);
}

#[test]
fn test_threshold_signs_equality() {
    for _ in 0..100 {
        let total = (OsRng.next_u32() % 15 + 2) as usize;
        let threshold = (OsRng.next_u32() as usize % (total - 1)) + 1;
        let params = ThresholdParameters::new(threshold, total).unwrap();
        let (keys, poly) = generate_sample_keys::<Bls12381>(&mut OsRng, &params).unwrap();

        let mut msg = vec![0u8; (OsRng.next_u32() % 1000 + 2) as usize];
        OsRng.fill_bytes(&mut msg);

        let s1 = choose_signers(threshold, total);
        let s2 = choose_signers(threshold, total);
        let sig1 = sign_with(&keys, &s1, params, &msg);
        let sig2 = sign_with(&keys, &s2, params, &msg);
        assert_eq!(sig1, sig2);

        let public_key = poly.commit().public_key();
        assert!(public_key.verify(&hash_message(&msg), &sig1));
    }
}

#[test]
fn test_keys_equality() {
    for _ in 0..100 {
        let total = (OsRng.next_u32() % 15 + 2) as usize;
        let threshold = (OsRng.next_u32() as usize % (total - 1)) + 1;
        let params = ThresholdParameters::new(threshold, total).unwrap();
        let (keys, poly) = generate_sample_keys::<Bls12381>(&mut OsRng, &params).unwrap();

        let signers = choose_signers(threshold, total);
        let lagrange = crate::LagrangeCoefficients::<Bls12381>::new(&params, &signers).unwrap();

        let mut secret = bls12_381::Scalar::ZERO;
        let mut public = bls12_381::G2Projective::identity();
        for (p, lambda) in lagrange.iter() {
            let key = &keys[u32::from(p) as usize - 1];
            secret += lambda * key.secret();
            public += *key.public_key_share().point() * lambda;
        }
        assert_eq!(secret, poly[0]);
        assert_eq!(public, bls12_381::G2Projective::generator() * poly[0]);
        assert_eq!(public, *poly.commit().public_key().point());
    }
}

#[test]
fn test_concurrent_signers() {
    let params = ThresholdParameters::new(4, 7).unwrap();
    let (keys, poly) = generate_sample_keys::<Bls12381>(&mut OsRng, &params).unwrap();
    let digest = hash_message(b"signed from many threads");

    let set = Mutex::new(SignatureShareSet::<Bls12381>::new(params));
    Parallel::new()
        .each(keys.iter().take(4), |key| {
            let share = key.sign(&digest);
            set.lock().unwrap().add_share(share).unwrap();
        })
        .run();

    let signature = set.into_inner().unwrap().merge().unwrap();
    assert!(poly.commit().public_key().verify(&digest, &signature));
}
