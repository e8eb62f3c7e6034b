use crate::errors::{PlonkError, Result};
use crate::plonk::{
    helpers::{check_quotient, eval_pi_poly, fold_h, r_commitment, DomainEvaluations},
    proof::{Proof, ProofEvaluations},
    transcript::derive_challenges,
    verifying_key::VerifyingKey,
};
use crate::poly_commit::kzg_poly_com::KZGCommitmentSchemeBN254;
use ark_std::{end_timer, start_timer};
use bnplonk_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// The constant beta of the legacy transcript.
pub const LEGACY_CONSTANT_BETA: u64 = 10;

/// How the permutation challenge beta is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BetaChallenge {
    /// Beta is derived from the wire commitments.
    #[default]
    Derived,
    /// Beta is a constant and gamma binds only the wire commitments.
    ///
    /// This is NOT the standard protocol: the challenges do not depend on the
    /// verifying key nor on the public witness. It only exists to check
    /// proofs from provers using that transcript.
    Constant(u64),
}

/// Options of the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerifierOptions {
    /// How beta is obtained.
    pub beta: BetaChallenge,
}

impl VerifierOptions {
    /// The non-standard options with the legacy constant beta.
    pub fn legacy() -> Self {
        VerifierOptions {
            beta: BetaChallenge::Constant(LEGACY_CONSTANT_BETA),
        }
    }
}

/// Verify `proof` against `vk` and `public_witness`.
pub fn verify(proof: &Proof, vk: &VerifyingKey, public_witness: &[BN254Scalar]) -> Result<()> {
    verify_with_options(proof, vk, public_witness, &VerifierOptions::default())
}

/// Verify `proof` against `vk` and `public_witness` with the given options.
pub fn verify_with_options(
    proof: &Proof,
    vk: &VerifyingKey,
    public_witness: &[BN254Scalar],
    options: &VerifierOptions,
) -> Result<()> {
    let verifier_time = start_timer!(|| "PLONK verifier");

    vk.validate()?;
    if public_witness.len() as u64 != vk.nb_public_variables {
        return Err(PlonkError::InvalidWitnessLength {
            expected: vk.nb_public_variables as usize,
            actual: public_witness.len(),
        });
    }
    if proof.bsb22_commitments.len() != vk.qcp.len() {
        return Err(PlonkError::MalformedProof(format!(
            "expected {} BSB22 commitments, got {}",
            vk.qcp.len(),
            proof.bsb22_commitments.len()
        )));
    }
    let evals = ProofEvaluations::parse(proof)?;

    // 1. compute all challenges: gamma, beta, alpha and zeta.
    let step = start_timer!(|| "Challenges");
    let challenges = derive_challenges(proof, vk, public_witness, options)?;
    let zeta = challenges.zeta;
    end_timer!(step);

    // 2. compute Z_h(zeta), L_1(zeta) and PI(zeta).
    let step = start_timer!(|| "Public inputs");
    let domain = DomainEvaluations::new(vk, &zeta)?;
    let pi = eval_pi_poly(vk, public_witness, &proof.bsb22_commitments, &zeta, &domain)?;
    end_timer!(step);

    // 3. check the claimed quotient.
    let step = start_timer!(|| "Quotient");
    check_quotient(&evals, &challenges, &pi, &domain)?;
    end_timer!(step);

    // 4. derive the linearization polynomial commitment.
    let step = start_timer!(|| "Linearization");
    let linearized_digest = r_commitment(vk, proof, &evals, &challenges, &domain);
    end_timer!(step);

    // 5. fold the openings at zeta.
    let step = start_timer!(|| "Fold");
    let mut digests: Vec<BN254G1> = vec![
        fold_h(&proof.h, &zeta, vk.size),
        linearized_digest,
        proof.lro[0],
        proof.lro[1],
        proof.lro[2],
        vk.s[0],
        vk.s[1],
    ];
    digests.extend(vk.qcp.iter());
    let (folded_proof, folded_digest) =
        KZGCommitmentSchemeBN254::fold_proof(&digests, &proof.batched_proof, &zeta)?;
    end_timer!(step);

    // 6. check the openings at zeta and zeta * g together.
    let step = start_timer!(|| "Batch pairing check");
    let shifted_zeta = zeta.mul(&vk.generator);
    vk.kzg.batch_verify_multi_points(
        &[folded_digest, proof.z],
        &[folded_proof, proof.z_shifted_opening.clone()],
        &[zeta, shifted_zeta],
    )?;
    end_timer!(step);

    end_timer!(verifier_time);
    Ok(())
}
