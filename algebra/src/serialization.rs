use crate::bn254::{BN254Gt, BN254Scalar, BN254G1, BN254G2};
use crate::prelude::*;

/// Helper trait to serialize objects that have a canonical byte encoding.
pub trait CanonicalBytes: Sized {
    /// Convert to the canonical bytes.
    fn to_canonical_bytes(&self) -> Vec<u8>;
    /// Reconstruct from the canonical bytes.
    fn from_canonical_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Implement serde for a type with `CanonicalBytes`: a base64 string for
/// human-readable formats, raw bytes otherwise.
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let bytes = $crate::serialization::CanonicalBytes::to_canonical_bytes(self);
                if serializer.is_human_readable() {
                    serializer.serialize_str(&$crate::utils::b64enc(&bytes))
                } else {
                    serializer.serialize_bytes(&bytes)
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bytes = if deserializer.is_human_readable() {
                    deserializer.deserialize_str($crate::serialization::obj_serde::BytesVisitor)?
                } else {
                    deserializer.deserialize_bytes($crate::serialization::obj_serde::BytesVisitor)?
                };
                <$t as $crate::serialization::CanonicalBytes>::from_canonical_bytes(
                    bytes.as_slice(),
                )
                .map_err(serde::de::Error::custom)
            }
        }
    };
}

impl CanonicalBytes for BN254Scalar {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        self.to_be_bytes()
    }

    fn from_canonical_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_be_bytes_canonical(bytes)
    }
}

impl CanonicalBytes for BN254G1 {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        self.to_gnark_compressed_bytes().to_vec()
    }

    fn from_canonical_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_gnark_compressed_bytes(bytes)
    }
}

macro_rules! to_from_bytes_group {
    ($g:ident) => {
        impl CanonicalBytes for $g {
            fn to_canonical_bytes(&self) -> Vec<u8> {
                self.to_compressed_bytes()
            }

            fn from_canonical_bytes(bytes: &[u8]) -> Result<$g> {
                $g::from_compressed_bytes(bytes)
            }
        }
    };
}

to_from_bytes_group!(BN254G2);
to_from_bytes_group!(BN254Gt);

serialize_deserialize!(BN254Scalar);
serialize_deserialize!(BN254G1);
serialize_deserialize!(BN254G2);
serialize_deserialize!(BN254Gt);

/// Serde helpers for objects with `CanonicalBytes`.
pub mod obj_serde {
    use crate::serialization::CanonicalBytes;
    use crate::utils::{b64dec, b64enc};
    use ark_std::vec::Vec;
    use serde::de::{SeqAccess, Visitor};
    use serde::{Deserializer, Serializer};

    /// A visitor that accepts bytes, sequences of bytes and base64 strings.
    pub struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut ::core::fmt::Formatter) -> core::fmt::Result {
            formatter.write_str("a valid canonical byte encoding")
        }

        fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
        where
            V: SeqAccess<'de>,
        {
            let mut vec: Vec<u8> = Vec::new();
            while let Some(x) = seq.next_element()? {
                vec.push(x);
            }
            Ok(vec)
        }

        fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_str<E>(self, v: &str) -> core::result::Result<Vec<u8>, E>
        where
            E: serde::de::Error,
        {
            b64dec(v).map_err(serde::de::Error::custom)
        }
    }

    /// Serialize an object through its canonical bytes.
    pub fn serialize<S, T>(obj: &T, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: CanonicalBytes,
    {
        let bytes = obj.to_canonical_bytes();
        if serializer.is_human_readable() {
            serializer.serialize_str(&b64enc(&bytes))
        } else {
            serializer.serialize_bytes(&bytes[..])
        }
    }

    /// Deserialize an object from its canonical bytes.
    pub fn deserialize<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: CanonicalBytes,
    {
        let bytes = if deserializer.is_human_readable() {
            deserializer.deserialize_str(BytesVisitor)?
        } else {
            deserializer.deserialize_bytes(BytesVisitor)?
        };
        T::from_canonical_bytes(bytes.as_slice()).map_err(serde::de::Error::custom)
    }
}
