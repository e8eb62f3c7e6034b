use crate::bn254::BN254_SCALAR_LEN;
use crate::prelude::*;
use crate::traits::Domain;
use ark_bn254::Fr;
use ark_ff::{BigInteger, BigInteger256, FftField, Field, PrimeField};
use ark_std::{
    fmt::{Debug, Formatter},
    result::Result as StdResult,
    str::FromStr,
    vec::Vec,
};
use num_bigint::BigUint;

/// The wrapped struct for `ark_bn254::Fr`
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BN254Scalar(pub(crate) Fr);

impl Debug for BN254Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <BigUint as Debug>::fmt(
            &<BigInteger256 as Into<BigUint>>::into(self.0.into_bigint()),
            f,
        )
    }
}

impl FromStr for BN254Scalar {
    type Err = AlgebraError;

    fn from_str(string: &str) -> StdResult<Self, AlgebraError> {
        Fr::from_str(string)
            .map(Self)
            .map_err(|_| AlgebraError::DeserializationError)
    }
}

impl From<BN254Scalar> for BigUint {
    #[inline]
    fn from(value: BN254Scalar) -> BigUint {
        value.0.into_bigint().into()
    }
}

impl<'a> From<&'a BigUint> for BN254Scalar {
    #[inline]
    fn from(src: &BigUint) -> Self {
        Self(Fr::from(src.clone()))
    }
}

impl One for BN254Scalar {
    #[inline]
    fn one() -> Self {
        BN254Scalar(Fr::one())
    }
}

impl Zero for BN254Scalar {
    #[inline]
    fn zero() -> Self {
        Self(Fr::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.add(&rhs.0))
    }
}

impl Mul for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0.mul(&rhs.0))
    }
}

impl Sum<BN254Scalar> for BN254Scalar {
    #[inline]
    fn sum<I: Iterator<Item = BN254Scalar>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Add<&'a BN254Scalar> for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0.add(&rhs.0))
    }
}

impl<'a> AddAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        (self.0).add_assign(&rhs.0);
    }
}

impl<'a> Sub<&'a BN254Scalar> for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0.sub(&rhs.0))
    }
}

impl<'a> SubAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        (self.0).sub_assign(&rhs.0);
    }
}

impl<'a> Mul<&'a BN254Scalar> for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn mul(self, rhs: &Self) -> Self::Output {
        Self(self.0.mul(&rhs.0))
    }
}

impl<'a> MulAssign<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        (self.0).mul_assign(&rhs.0);
    }
}

impl<'a> Sum<&'a BN254Scalar> for BN254Scalar {
    #[inline]
    fn sum<I: Iterator<Item = &'a BN254Scalar>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl Neg for BN254Scalar {
    type Output = BN254Scalar;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.neg())
    }
}

impl From<u32> for BN254Scalar {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from(value as u64)
    }
}

impl From<u64> for BN254Scalar {
    #[inline]
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl Scalar for BN254Scalar {
    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Self(Fr::GENERATOR)
    }

    #[inline]
    fn get_field_size_biguint() -> BigUint {
        Fr::MODULUS.into()
    }

    #[inline]
    fn get_field_size_le_bytes() -> Vec<u8> {
        Fr::MODULUS.to_bytes_le()
    }

    #[inline]
    fn get_little_endian_u64(&self) -> Vec<u64> {
        let a = self.0.into_bigint().to_bytes_le();
        a.chunks(8).map(u8_le_slice_to_u64).collect()
    }

    #[inline]
    fn bytes_len() -> usize {
        BN254_SCALAR_LEN
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_le()
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::bytes_len() {
            return Err(AlgebraError::DeserializationError);
        }
        Ok(Self(Fr::from_le_bytes_mod_order(bytes)))
    }

    #[inline]
    fn to_be_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_be()
    }

    #[inline]
    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    fn from_be_bytes_canonical(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::bytes_len() {
            return Err(AlgebraError::DeserializationError);
        }
        let mut limbs = [0u64; 4];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks(8)) {
            *limb = u8_be_slice_to_u64(chunk);
        }
        Fr::from_bigint(BigInteger256::new(limbs))
            .map(Self)
            .ok_or(AlgebraError::DeserializationError)
    }

    #[inline]
    fn inv(&self) -> Result<Self> {
        self.0
            .inverse()
            .map(Self)
            .ok_or(AlgebraError::GroupInversionError)
    }

    #[inline]
    fn pow(&self, exponent: &[u64]) -> Self {
        Self(self.0.pow(exponent))
    }

    #[inline]
    fn square(&self) -> Self {
        Self(self.0.square())
    }
}

impl Domain for BN254Scalar {
    type Field = Fr;

    #[inline]
    fn get_field(&self) -> Self::Field {
        self.0
    }

    #[inline]
    fn from_field(field: Self::Field) -> Self {
        Self(field)
    }
}
