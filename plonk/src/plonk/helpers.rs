use crate::errors::{PlonkError, Result};
use crate::plonk::{
    proof::{Proof, ProofEvaluations},
    transcript::PlonkChallenges,
    verifying_key::VerifyingKey,
};
use bnplonk_algebra::{
    bn254::{BN254Scalar, BN254G1},
    hash_to_field::hash_to_field,
    prelude::*,
};

/// The domain separation tag used to hash BSB22 commitments to the field.
pub const BSB22_HASH_DST: &[u8] = b"BSB22-Plonk";

/// Evaluations at `zeta` that only depend on the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DomainEvaluations {
    /// `zeta^n - 1`, the vanishing polynomial of the domain at `zeta`.
    pub(crate) vanishing: BN254Scalar,
    /// `L_1(zeta) = (zeta^n - 1) / (n * (zeta - 1))`.
    pub(crate) first_lagrange: BN254Scalar,
}

impl DomainEvaluations {
    /// Evaluate the vanishing polynomial and the first Lagrange polynomial
    /// of the domain of `vk` at `zeta`, which must lie outside of the domain.
    pub(crate) fn new(vk: &VerifyingKey, zeta: &BN254Scalar) -> Result<Self> {
        let one = BN254Scalar::one();
        let vanishing = zeta.pow(&[vk.size]).sub(&one);
        if vanishing.is_zero() {
            return Err(PlonkError::ArithmeticError(
                "zeta lies in the evaluation domain".into(),
            ));
        }
        let first_lagrange = vanishing
            .mul(&checked_inv(&zeta.sub(&one))?)
            .mul(&vk.size_inv);
        Ok(DomainEvaluations {
            vanishing,
            first_lagrange,
        })
    }
}

fn checked_inv(x: &BN254Scalar) -> Result<BN254Scalar> {
    x.inv()
        .map_err(|_| PlonkError::ArithmeticError("division by zero".into()))
}

/// Hash a BSB22 commitment to the field element it contributes to the
/// public inputs.
pub fn bsb22_hash(commitment: &BN254G1) -> Result<BN254Scalar> {
    let bytes = commitment.to_gnark_compressed_bytes();
    hash_to_field::<BN254Scalar>(&bytes, BSB22_HASH_DST, 1)?
        .pop()
        .ok_or(PlonkError::Algebra(AlgebraError::HashToFieldLengthError))
}

/// Evaluate at `zeta` the polynomial interpolating the public witness on the
/// first points of the domain and the hashes of the BSB22 commitments at
/// their constraint indexes.
pub(crate) fn eval_pi_poly(
    vk: &VerifyingKey,
    public_witness: &[BN254Scalar],
    bsb22_commitments: &[BN254G1],
    zeta: &BN254Scalar,
    domain: &DomainEvaluations,
) -> Result<BN254Scalar> {
    let mut pi = BN254Scalar::zero();

    // L_{i+1}(zeta) = g * L_i(zeta) * (zeta - g^i) / (zeta - g^{i+1})
    let mut lagrange = domain.first_lagrange;
    let mut w_pow_i = BN254Scalar::one();
    for (i, w) in public_witness.iter().enumerate() {
        pi.add_assign(&lagrange.mul(w));

        if i + 1 != public_witness.len() {
            let num = zeta.sub(&w_pow_i);
            w_pow_i.mul_assign(&vk.generator);
            let den_inv = checked_inv(&zeta.sub(&w_pow_i))?;
            lagrange = lagrange.mul(&vk.generator).mul(&num).mul(&den_inv);
        }
    }

    if bsb22_commitments.len() != vk.commitment_constraint_indexes.len() {
        return Err(PlonkError::MalformedProof(format!(
            "expected {} BSB22 commitments, found {}",
            vk.commitment_constraint_indexes.len(),
            bsb22_commitments.len()
        )));
    }
    // L_j(zeta) = g^j * (zeta - 1) / (zeta - g^j) * L_1(zeta)
    let zeta_minus_one = zeta.sub(&BN254Scalar::one());
    for (commitment, index) in bsb22_commitments
        .iter()
        .zip_eq(vk.commitment_constraint_indexes.iter())
    {
        let hash = bsb22_hash(commitment)?;
        let w_pow_j = vk.generator.pow(&[vk.nb_public_variables + index]);
        let den_inv = checked_inv(&zeta.sub(&w_pow_j))?;
        let lagrange = w_pow_j
            .mul(&zeta_minus_one)
            .mul(&den_inv)
            .mul(&domain.first_lagrange);
        pi.add_assign(&lagrange.mul(&hash));
    }

    Ok(pi)
}

/// Check that the claimed quotient is
/// `(r(zeta) + PI(zeta) + alpha * z(zeta * g) * (l + beta * s1 + gamma) * (r + beta * s2 + gamma) * (o + gamma) - alpha^2 * L_1(zeta)) / (zeta^n - 1)`.
pub(crate) fn check_quotient(
    evals: &ProofEvaluations,
    challenges: &PlonkChallenges,
    pi: &BN254Scalar,
    domain: &DomainEvaluations,
) -> Result<()> {
    let PlonkChallenges {
        gamma, beta, alpha, ..
    } = challenges;

    let l_term = beta.mul(&evals.s1).add(&evals.l).add(gamma);
    let r_term = beta.mul(&evals.s2).add(&evals.r).add(gamma);
    let o_term = evals.o.add(gamma);
    let permutation = l_term
        .mul(&r_term)
        .mul(&o_term)
        .mul(alpha)
        .mul(&evals.z_shifted);

    let alpha_sq_first_lagrange = alpha.square().mul(&domain.first_lagrange);

    let expected = evals
        .linearized_polynomial
        .add(pi)
        .add(&permutation)
        .sub(&alpha_sq_first_lagrange)
        .mul(&checked_inv(&domain.vanishing)?);

    if expected == evals.quotient {
        Ok(())
    } else {
        Err(PlonkError::QuotientMismatch)
    }
}

/// Compute the commitment to the linearized polynomial
/// `sum_i qcp_i(zeta) * Bsb22_i + l * Ql + r * Qr + l * r * Qm + o * Qo + Qk
/// + alpha * beta * z(zeta * g) * (l + beta * s1 + gamma) * (r + beta * s2 + gamma) * S3
/// + (alpha^2 * L_1(zeta) - alpha * (l + beta * zeta + gamma) * (r + beta * mu * zeta + gamma) * (o + beta * mu^2 * zeta + gamma)) * Z`.
pub(crate) fn r_commitment(
    vk: &VerifyingKey,
    proof: &Proof,
    evals: &ProofEvaluations,
    challenges: &PlonkChallenges,
    domain: &DomainEvaluations,
) -> BN254G1 {
    let PlonkChallenges {
        gamma,
        beta,
        alpha,
        zeta,
    } = challenges;
    let ProofEvaluations {
        l, r, o, s1, s2, ..
    } = evals;

    let s3_scalar = evals
        .z_shifted
        .mul(beta)
        .mul(&beta.mul(s1).add(l).add(gamma))
        .mul(&beta.mul(s2).add(r).add(gamma))
        .mul(alpha);

    let beta_zeta = beta.mul(zeta);
    let coset_shift_sq = vk.coset_shift.square();
    let z_scalar = beta_zeta
        .add(l)
        .add(gamma)
        .mul(&beta_zeta.mul(&vk.coset_shift).add(r).add(gamma))
        .mul(&beta_zeta.mul(&coset_shift_sq).add(o).add(gamma))
        .neg()
        .mul(alpha)
        .add(&alpha.square().mul(&domain.first_lagrange));

    let mut scalars = evals.qcp.clone();
    scalars.extend([
        *l,
        *r,
        l.mul(r),
        *o,
        BN254Scalar::one(),
        s3_scalar,
        z_scalar,
    ]);

    let mut points: Vec<&BN254G1> = proof.bsb22_commitments.iter().collect();
    points.extend([&vk.ql, &vk.qr, &vk.qm, &vk.qo, &vk.qk, &vk.s[2], &proof.z]);

    let scalars_ref: Vec<&BN254Scalar> = scalars.iter().collect();
    BN254G1::multi_exp(&scalars_ref, &points)
}

/// Fold the quotient parts as `H0 + zeta^(n+2) * H1 + zeta^(2(n+2)) * H2`.
pub(crate) fn fold_h(h: &[BN254G1; 3], zeta: &BN254Scalar, size: u64) -> BN254G1 {
    let zeta_n_plus_two = zeta.pow(&[size + 2]);
    h[2].mul(&zeta_n_plus_two)
        .add(&h[1])
        .mul(&zeta_n_plus_two)
        .add(&h[0])
}
