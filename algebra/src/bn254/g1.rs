use crate::bn254::{BN254Scalar, BN254_G1_COMPRESSED_LEN, BN254_G1_RAW_LEN};
use crate::prelude::*;
use ark_bn254::{Fq, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup, Group as ArkGroup, VariableBaseMSM};
use ark_ff::{BigInteger, BigInteger256, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use ark_std::{
    fmt::{Debug, Display, Formatter},
    vec::Vec,
};

/// Mask over the two flag bits of the first byte of an encoded point.
const FLAG_MASK: u8 = 0b11 << 6;
/// Flag of a compressed point whose `y` is the smaller of the two roots.
const FLAG_COMPRESSED_SMALLEST: u8 = 0b10 << 6;
/// Flag of a compressed point whose `y` is the larger of the two roots.
const FLAG_COMPRESSED_LARGEST: u8 = 0b11 << 6;
/// Flag of the compressed point at infinity.
const FLAG_COMPRESSED_INFINITY: u8 = 0b01 << 6;

/// The wrapped struct for ark_bn254::G1Projective
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BN254G1(pub(crate) G1Projective);

impl Debug for BN254G1 {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <G1Affine as Display>::fmt(&self.0.into_affine(), f)
    }
}

impl Group for BN254G1 {
    type ScalarType = BN254Scalar;
    const COMPRESSED_LEN: usize = 32;
    const UNCOMPRESSED_LEN: usize = 64;

    #[inline]
    fn double(&self) -> Self {
        Self(ArkGroup::double(&self.0))
    }

    #[inline]
    fn get_identity() -> Self {
        Self(G1Projective::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(G1Projective::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(G1Projective::rand(prng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let affine = G1Affine::from(self.0);
        let mut buf = Vec::new();
        affine.serialize_with_mode(&mut buf, Compress::Yes).unwrap();

        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = G1Affine::deserialize_with_mode(bytes, Compress::Yes, Validate::Yes)
            .map_err(|_| AlgebraError::DeserializationError)?;

        Ok(Self(G1Projective::from(affine)))
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        if scalars.is_empty() || points.is_empty() {
            return Self::get_identity();
        }
        let scalars_raw: Vec<_> = scalars.iter().map(|r| r.0).collect();
        let points_raw = G1Projective::normalize_batch(
            &points.iter().map(|r| r.0).collect::<Vec<G1Projective>>(),
        );

        Self(G1Projective::msm_unchecked(&points_raw, &scalars_raw))
    }
}

impl BN254G1 {
    /// Encode the point as `x || y`, each coordinate in 32 big-endian bytes.
    /// The point at infinity is encoded as 64 zero bytes.
    pub fn to_raw_bytes(&self) -> [u8; BN254_G1_RAW_LEN] {
        let mut res = [0u8; BN254_G1_RAW_LEN];
        let affine = self.0.into_affine();
        if affine.is_zero() {
            return res;
        }
        res[..32].copy_from_slice(&affine.x.into_bigint().to_bytes_be());
        res[32..].copy_from_slice(&affine.y.into_bigint().to_bytes_be());
        res
    }

    /// Decode the output of [`BN254G1::to_raw_bytes`], checking that the
    /// point lies on the curve.
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BN254_G1_RAW_LEN || bytes[0] & FLAG_MASK != 0 {
            return Err(AlgebraError::DeserializationError);
        }
        if bytes.iter().all(|b| *b == 0) {
            return Ok(Self::get_identity());
        }
        let x = fq_from_be_bytes(&bytes[..32])?;
        let y = fq_from_be_bytes(&bytes[32..])?;
        let affine = G1Affine::new_unchecked(x, y);
        if !affine.is_on_curve() || !affine.is_in_correct_subgroup_assuming_on_curve() {
            return Err(AlgebraError::PointNotOnCurve);
        }
        Ok(Self(affine.into_group()))
    }

    /// Encode the point as its big-endian `x` coordinate, with the two top
    /// bits of the first byte telling which square root `y` is.
    pub fn to_gnark_compressed_bytes(&self) -> [u8; BN254_G1_COMPRESSED_LEN] {
        let mut res = [0u8; BN254_G1_COMPRESSED_LEN];
        let affine = self.0.into_affine();
        if affine.is_zero() {
            res[0] = FLAG_COMPRESSED_INFINITY;
            return res;
        }
        let flag = if affine.y.into_bigint() > (-affine.y).into_bigint() {
            FLAG_COMPRESSED_LARGEST
        } else {
            FLAG_COMPRESSED_SMALLEST
        };
        res.copy_from_slice(&affine.x.into_bigint().to_bytes_be());
        res[0] |= flag;
        res
    }

    /// Decode the output of [`BN254G1::to_gnark_compressed_bytes`].
    pub fn from_gnark_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BN254_G1_COMPRESSED_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        let flag = bytes[0] & FLAG_MASK;
        if flag == FLAG_COMPRESSED_INFINITY {
            if bytes[0] != FLAG_COMPRESSED_INFINITY || bytes[1..].iter().any(|b| *b != 0) {
                return Err(AlgebraError::DeserializationError);
            }
            return Ok(Self::get_identity());
        }
        if flag != FLAG_COMPRESSED_SMALLEST && flag != FLAG_COMPRESSED_LARGEST {
            return Err(AlgebraError::DeserializationError);
        }

        let mut x_bytes = [0u8; BN254_G1_COMPRESSED_LEN];
        x_bytes.copy_from_slice(bytes);
        x_bytes[0] &= !FLAG_MASK;
        let x = fq_from_be_bytes(&x_bytes)?;

        let affine =
            G1Affine::get_point_from_x_unchecked(x, flag == FLAG_COMPRESSED_LARGEST)
                .ok_or(AlgebraError::PointNotOnCurve)?;
        if !affine.is_in_correct_subgroup_assuming_on_curve() {
            return Err(AlgebraError::PointNotOnCurve);
        }
        Ok(Self(affine.into_group()))
    }
}

/// Read a canonical 32-byte big-endian base field element.
fn fq_from_be_bytes(bytes: &[u8]) -> Result<Fq> {
    if bytes.len() != 32 {
        return Err(AlgebraError::DeserializationError);
    }
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks(8)) {
        *limb = u8_be_slice_to_u64(chunk);
    }
    Fq::from_bigint(BigInteger256::new(limbs)).ok_or(AlgebraError::DeserializationError)
}

impl<'a> Add<&'a BN254G1> for BN254G1 {
    type Output = BN254G1;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0.add(&rhs.0))
    }
}

impl<'a> Sub<&'a BN254G1> for BN254G1 {
    type Output = BN254G1;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0.sub(&rhs.0))
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254G1 {
    type Output = BN254G1;

    #[inline]
    fn mul(self, rhs: &BN254Scalar) -> Self::Output {
        Self(self.0.mul(&rhs.0))
    }
}

impl<'a> AddAssign<&'a BN254G1> for BN254G1 {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BN254G1) {
        self.0.add_assign(&rhs.0)
    }
}

impl<'a> SubAssign<&'a BN254G1> for BN254G1 {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BN254G1) {
        self.0.sub_assign(&rhs.0)
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254G1 {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a BN254Scalar) {
        self.0.mul_assign(rhs.0)
    }
}

impl Neg for BN254G1 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}
