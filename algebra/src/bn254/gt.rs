use crate::bn254::{BN254PairingEngine, BN254Scalar, BN254G1, BN254G2};
use crate::prelude::*;
use ark_bn254::Fq12;
use ark_ff::{Field, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use ark_std::vec::Vec;

/// The wrapped struct for `ark_bn254::Fq12`, which is the pairing result.
/// The group law is written additively.
#[derive(Copy, Default, Clone, PartialEq, Eq, Debug)]
pub struct BN254Gt(pub(crate) Fq12);

impl Neg for BN254Gt {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let mut v = self.0;
        v.conjugate_in_place();
        Self(v)
    }
}

impl<'a> Add<&'a BN254Gt> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn add(self, rhs: &'a BN254Gt) -> Self::Output {
        Self(self.0.mul(&rhs.0))
    }
}

impl<'a> Sub<&'a BN254Gt> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn sub(self, rhs: &'a BN254Gt) -> Self::Output {
        let mut rhs_inverse = rhs.0;
        rhs_inverse.conjugate_in_place();

        Self(self.0.mul(&rhs_inverse))
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254Gt {
    type Output = BN254Gt;

    #[inline]
    fn mul(self, rhs: &'a BN254Scalar) -> Self::Output {
        Self(self.0.pow(rhs.0.into_bigint()))
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254Gt {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a BN254Scalar) {
        *self = self.mul(rhs)
    }
}

impl<'a> AddAssign<&'a BN254Gt> for BN254Gt {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BN254Gt) {
        self.0.mul_assign(&rhs.0)
    }
}

impl<'a> SubAssign<&'a BN254Gt> for BN254Gt {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BN254Gt) {
        let mut rhs_inverse = rhs.0;
        rhs_inverse.conjugate_in_place();

        self.0.mul_assign(&rhs_inverse)
    }
}

impl Group for BN254Gt {
    type ScalarType = BN254Scalar;

    const COMPRESSED_LEN: usize = 384;
    const UNCOMPRESSED_LEN: usize = 384;

    #[inline]
    fn double(&self) -> Self {
        Self(self.0.square())
    }

    #[inline]
    fn get_identity() -> Self {
        Self(Fq12::one())
    }

    #[inline]
    fn get_base() -> Self {
        BN254PairingEngine::pairing(&BN254G1::get_base(), &BN254G2::get_base())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        BN254PairingEngine::pairing(&BN254G1::random(prng), &BN254G2::get_base())
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.0.serialize_with_mode(&mut buf, Compress::Yes).unwrap();

        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let res = Fq12::deserialize_with_mode(bytes, Compress::Yes, Validate::Yes)
            .map_err(|_| AlgebraError::DeserializationError)?;

        Ok(Self(res))
    }

    #[inline]
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        scalars
            .iter()
            .zip(points.iter())
            .fold(Self::get_identity(), |acc, (s, p)| acc.add(&p.mul(s)))
    }
}
