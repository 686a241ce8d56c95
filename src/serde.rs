use core::fmt;

use elliptic_curve::{group::GroupEncoding, PrimeField};
use serde::{
    de::{self, DeserializeOwned, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Encode an arbitrary serializable value into a vec.
pub fn encode<T: Serialize + ?Sized>(val: &T) -> Vec<u8> {
    rmp_serde::encode::to_vec(val).expect("failed to encode value")
}

/// Decode a value previously produced by [encode].
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, rmp_serde::decode::Error> {
    rmp_serde::decode::from_slice(data)
}

/// Accepts either a byte string or a sequence of bytes.
struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a byte string")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            out.push(b);
        }
        Ok(out)
    }
}

/// Read bytes into a fixed size representation, checking the length.
fn fill_repr<R: Default + AsMut<[u8]>, E: de::Error>(bytes: &[u8]) -> Result<R, E> {
    let mut repr = R::default();
    let len = repr.as_mut().len();
    if bytes.len() != len {
        return Err(E::invalid_length(bytes.len(), &"a canonical encoding"));
    }
    repr.as_mut().copy_from_slice(bytes);
    Ok(repr)
}

/// Serialize a scalar through its canonical representation.
pub fn serialize_scalar<F: PrimeField, S: Serializer>(
    data: &F,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bytes(data.to_repr().as_ref())
}

/// Deserialize a scalar, rejecting non canonical encodings.
pub fn deserialize_scalar<'de, F: PrimeField, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<F, D::Error> {
    let bytes = deserializer.deserialize_bytes(BytesVisitor)?;
    let repr: F::Repr = fill_repr::<_, D::Error>(&bytes)?;
    Option::from(F::from_repr(repr)).ok_or_else(|| de::Error::custom("invalid scalar"))
}

/// Serialize a single group element, in compressed form.
pub fn serialize_point<G: GroupEncoding, S: Serializer>(
    data: &G,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bytes(data.to_bytes().as_ref())
}

/// Deserialize a single group element, rejecting points off the curve or
/// outside the prime order subgroup.
pub fn deserialize_point<'de, G: GroupEncoding, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<G, D::Error> {
    let bytes = deserializer.deserialize_bytes(BytesVisitor)?;
    let repr: G::Repr = fill_repr::<_, D::Error>(&bytes)?;
    Option::from(G::from_bytes(&repr)).ok_or_else(|| de::Error::custom("invalid point"))
}

#[derive(Clone, Copy)]
pub(crate) struct SerializablePoint<G: GroupEncoding>(pub G);

impl<G: GroupEncoding> Serialize for SerializablePoint<G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_point(&self.0, serializer)
    }
}

impl<'de, G: GroupEncoding> Deserialize<'de> for SerializablePoint<G> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_point(deserializer).map(Self)
    }
}

/// Serialize a list of group elements.
pub fn serialize_points<G: GroupEncoding + Copy, S: Serializer>(
    data: &[G],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(data.iter().map(|x| SerializablePoint(*x)))
}

/// Deserialize a list of group elements.
pub fn deserialize_points<'de, G: GroupEncoding, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<G>, D::Error> {
    let points = Vec::<SerializablePoint<G>>::deserialize(deserializer)?;
    Ok(points.into_iter().map(|p| p.0).collect())
}
