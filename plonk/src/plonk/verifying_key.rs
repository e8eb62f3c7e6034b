use crate::errors::{PlonkError, Result};
use crate::poly_commit::{
    field_polynomial::primitive_nth_root_of_unity, kzg_poly_com::KZGCommitmentSchemeBN254,
};
use bnplonk_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// The verifying key of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    /// The size of the evaluation domain, a power of two.
    pub size: u64,
    /// The inverse of `size` in the scalar field.
    pub size_inv: BN254Scalar,
    /// The generator of the evaluation domain.
    pub generator: BN254Scalar,
    /// The number of public inputs.
    pub nb_public_variables: u64,
    /// The verifier part of the SRS.
    pub kzg: KZGCommitmentSchemeBN254,
    /// The shift separating the three copies of the domain in the permutation.
    pub coset_shift: BN254Scalar,
    /// The commitments to the permutation polynomials.
    pub s: [BN254G1; 3],
    /// The commitment to the left selector.
    pub ql: BN254G1,
    /// The commitment to the right selector.
    pub qr: BN254G1,
    /// The commitment to the multiplication selector.
    pub qm: BN254G1,
    /// The commitment to the output selector.
    pub qo: BN254G1,
    /// The commitment to the constant selector.
    pub qk: BN254G1,
    /// The commitments to the custom gate selectors.
    pub qcp: Vec<BN254G1>,
    /// For each custom gate selector, the index of the constraint carrying
    /// the hash of its BSB22 commitment, counted after the public inputs.
    pub commitment_constraint_indexes: Vec<u64>,
}

impl VerifyingKey {
    /// Build a verifying key for a domain of `size` elements, deriving the
    /// generator, the inverse of the size and the coset shift.
    /// Only the verifier part of `kzg` is kept.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        size: u64,
        nb_public_variables: u64,
        kzg: &KZGCommitmentSchemeBN254,
        s: [BN254G1; 3],
        ql: BN254G1,
        qr: BN254G1,
        qm: BN254G1,
        qo: BN254G1,
        qk: BN254G1,
        qcp: Vec<BN254G1>,
        commitment_constraint_indexes: Vec<u64>,
    ) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(PlonkError::InvalidVerifyingKey(format!(
                "domain size {} is not a power of two",
                size
            )));
        }
        let generator = primitive_nth_root_of_unity::<BN254Scalar>(size as usize).ok_or_else(|| {
            PlonkError::InvalidVerifyingKey(format!("no root of unity of order {}", size))
        })?;
        let size_inv = BN254Scalar::from(size).inv()?;

        let vk = VerifyingKey {
            size,
            size_inv,
            generator,
            nb_public_variables,
            kzg: kzg.shrink_to_verifier_only()?,
            coset_shift: BN254Scalar::multiplicative_generator(),
            s,
            ql,
            qr,
            qm,
            qo,
            qk,
            qcp,
            commitment_constraint_indexes,
        };
        vk.validate()?;
        Ok(vk)
    }

    /// Check the invariants the verifier relies on.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(PlonkError::InvalidVerifyingKey(msg));

        if !self.size.is_power_of_two() {
            return invalid(format!("domain size {} is not a power of two", self.size));
        }
        if self.size_inv.mul(&BN254Scalar::from(self.size)) != BN254Scalar::one() {
            return invalid("size_inv is not the inverse of size".into());
        }

        let one = BN254Scalar::one();
        if self.generator.pow(&[self.size]) != one
            || (self.size > 1 && self.generator.pow(&[self.size / 2]) == one)
        {
            return invalid(format!("generator does not have order {}", self.size));
        }

        let shift_sq = self.coset_shift.square();
        if self.coset_shift.is_zero()
            || self.coset_shift.pow(&[self.size]) == one
            || shift_sq.pow(&[self.size]) == one
        {
            return invalid("coset shift does not separate the domain copies".into());
        }

        if self.qcp.len() != self.commitment_constraint_indexes.len() {
            return invalid(format!(
                "{} custom gate selectors but {} commitment constraint indexes",
                self.qcp.len(),
                self.commitment_constraint_indexes.len()
            ));
        }
        if self.nb_public_variables > self.size {
            return invalid(format!(
                "{} public inputs do not fit a domain of size {}",
                self.nb_public_variables, self.size
            ));
        }
        for index in self.commitment_constraint_indexes.iter() {
            let row = self.nb_public_variables.checked_add(*index);
            if row.map_or(true, |row| row >= self.size) {
                return invalid(format!(
                    "commitment constraint index {} is out of the domain",
                    index
                ));
            }
        }

        if self.kzg.public_parameter_group_1.is_empty()
            || self.kzg.public_parameter_group_2.len() < 2
        {
            return invalid("missing verifier parameters of the SRS".into());
        }
        Ok(())
    }
}
