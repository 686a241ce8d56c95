use std::{
    error::Error,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use magikitten::MeowRng;
use structopt::StructOpt;
use threshold_bls::{
    generate_sample_keys, hash_message,
    serde::{decode, encode},
    Bls12381, MessageDigest, Participant, PublicKey, SignatureShareSet, ThresholdKeyShare,
    ThresholdParameters,
};
use tracing_subscriber::EnvFilter;

/// Sign a message with threshold BLS keys.
///
/// Key shares are read from `--key`, one file per participant. Without it,
/// sample keys are dealt from `--seed`, and can be saved with `--save-keys`
/// for later runs.
#[derive(Debug, StructOpt)]
struct Args {
    /// The threshold.
    #[structopt(long = "t")]
    threshold: usize,
    /// The number of participants.
    #[structopt(long = "n")]
    total: usize,
    /// The participant to sign as. If missing, every available participant
    /// signs, and the shares of the first `t` get merged.
    #[structopt(long = "j")]
    participant: Option<u32>,
    /// A file containing the message. If missing, standard input is used.
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Where to write the result. If missing, standard output is used.
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// Hash the message with SHA-256, instead of reading it as a hex digest.
    #[structopt(long)]
    rehash: bool,
    /// A directory holding encoded key shares.
    #[structopt(long, parse(from_os_str))]
    key: Option<PathBuf>,
    /// The seed for dealing sample keys, when no key directory is given.
    #[structopt(long, default_value = "0")]
    seed: u64,
    /// Save the sample keys dealt from the seed into this directory.
    #[structopt(long, parse(from_os_str))]
    save_keys: Option<PathBuf>,
}

const PUBLIC_KEY_FILE: &str = "public_key.bin";

fn key_file(dir: &Path, participant: Participant) -> PathBuf {
    dir.join(format!("bls_key_{}.bin", u32::from(participant)))
}

fn parse_hex_digest(data: &[u8]) -> Result<MessageDigest, Box<dyn Error>> {
    let text = std::str::from_utf8(data)?.trim();
    if !text.is_ascii() || text.len() != 64 {
        return Err("expected a 32 byte hex digest".into());
    }
    let mut out = [0u8; 32];
    for (o, pair) in out.iter_mut().zip(text.as_bytes().chunks(2)) {
        *o = u8::from_str_radix(std::str::from_utf8(pair)?, 16)?;
    }
    Ok(out)
}

fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Load the shares of the given participants, skipping missing files.
fn load_keys(
    dir: &Path,
    params: &ThresholdParameters,
    wanted: impl Iterator<Item = Participant>,
) -> Result<Vec<ThresholdKeyShare<Bls12381>>, Box<dyn Error>> {
    let mut keys = Vec::new();
    for p in wanted {
        let path = key_file(dir, p);
        if !path.exists() {
            tracing::debug!(participant = u32::from(p), "no key share found");
            continue;
        }
        let key: ThresholdKeyShare<Bls12381> = decode(&fs::read(&path)?)?;
        if key.participant() != p || key.parameters() != params {
            return Err(format!("{} holds a share for other parameters", path.display()).into());
        }
        keys.push(key);
    }
    Ok(keys)
}

fn save_keys(
    dir: &Path,
    keys: &[ThresholdKeyShare<Bls12381>],
    public_key: &PublicKey<Bls12381>,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    for key in keys {
        fs::write(key_file(dir, key.participant()), encode(key))?;
    }
    fs::write(dir.join(PUBLIC_KEY_FILE), encode(public_key))?;
    tracing::info!(dir = %dir.display(), count = keys.len(), "saved key shares");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::from_args();
    let params = ThresholdParameters::new(args.threshold, args.total)?;
    if let Some(j) = args.participant {
        params.check_participant(Participant::from(j))?;
    }

    let data = match &args.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            data
        }
    };
    let digest = if args.rehash {
        hash_message(&data)
    } else {
        parse_hex_digest(&data)?
    };
    tracing::info!(digest = %to_hex(&digest), "signing");

    let (keys, public_key) = match &args.key {
        Some(dir) => {
            let keys = match args.participant {
                Some(j) => load_keys(dir, &params, std::iter::once(Participant::from(j)))?,
                None => load_keys(dir, &params, params.participants())?,
            };
            let public_key_path = dir.join(PUBLIC_KEY_FILE);
            let public_key = if public_key_path.exists() {
                Some(decode::<PublicKey<Bls12381>>(&fs::read(public_key_path)?)?)
            } else {
                None
            };
            (keys, public_key)
        }
        None => {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&args.seed.to_le_bytes());
            let (keys, poly) =
                generate_sample_keys::<Bls12381>(&mut MeowRng::new(&seed), &params)?;
            let public_key = poly.commit().public_key();
            if let Some(dir) = &args.save_keys {
                save_keys(dir, &keys, &public_key)?;
            }
            let keys = match args.participant {
                Some(j) => keys
                    .into_iter()
                    .filter(|k| u32::from(k.participant()) == j)
                    .collect(),
                None => keys,
            };
            (keys, Some(public_key))
        }
    };

    let result = match args.participant {
        Some(j) => {
            let key = keys
                .first()
                .ok_or_else(|| format!("no key share for participant {}", j))?;
            encode(&key.sign(&digest))
        }
        None => {
            let mut set = SignatureShareSet::new(params);
            for key in keys.iter().take(params.threshold()) {
                let share = key.sign(&digest);
                if !key.public_key_share().verify(&digest, &share) {
                    return Err("signature share failed to verify".into());
                }
                set.add_share(share)?;
            }
            let signature = set.merge()?;
            match &public_key {
                Some(pk) if !pk.verify(&digest, &signature) => {
                    return Err("merged signature failed to verify".into());
                }
                Some(_) => {}
                None => tracing::warn!("no public key available, skipping verification"),
            }
            encode(&signature)
        }
    };

    let out = to_hex(&result);
    match &args.output {
        Some(path) => fs::write(path, format!("{}\n", out))?,
        None => println!("{}", out),
    }

    Ok(())
}
