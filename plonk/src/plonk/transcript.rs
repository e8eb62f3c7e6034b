use crate::errors::{PlonkError, Result};
use crate::fiat_shamir::{challenge_scalar, Sha256Transcript};
use crate::plonk::{
    proof::Proof,
    verifier::{BetaChallenge, VerifierOptions},
    verifying_key::VerifyingKey,
};
use bnplonk_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};

/// Label of the permutation challenge bound to the public data.
pub const GAMMA_LABEL: &str = "gamma";
/// Label of the permutation challenge bound to the wires.
pub const BETA_LABEL: &str = "beta";
/// Label of the challenge combining the constraints.
pub const ALPHA_LABEL: &str = "alpha";
/// Label of the evaluation point.
pub const ZETA_LABEL: &str = "zeta";

/// The challenges of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlonkChallenges {
    /// The permutation challenge gamma.
    pub gamma: BN254Scalar,
    /// The permutation challenge beta.
    pub beta: BN254Scalar,
    /// The constraint combination challenge alpha.
    pub alpha: BN254Scalar,
    /// The evaluation point zeta.
    pub zeta: BN254Scalar,
}

/// Derive the challenges of `proof` for `vk` and `public_witness`.
///
/// The result only depends on the arguments, so a prover calling this with
/// the commitments it has produced so far gets the challenges the verifier
/// will recompute.
pub fn derive_challenges(
    proof: &Proof,
    vk: &VerifyingKey,
    public_witness: &[BN254Scalar],
    options: &VerifierOptions,
) -> Result<PlonkChallenges> {
    match options.beta {
        BetaChallenge::Derived => derive_bound_challenges(proof, vk, public_witness),
        BetaChallenge::Constant(beta) => derive_constant_beta_challenges(proof, beta),
    }
}

fn derive_bound_challenges(
    proof: &Proof,
    vk: &VerifyingKey,
    public_witness: &[BN254Scalar],
) -> Result<PlonkChallenges> {
    let mut fs = Sha256Transcript::new(&[GAMMA_LABEL, BETA_LABEL, ALPHA_LABEL, ZETA_LABEL]);

    bind_public_data(&mut fs, GAMMA_LABEL, vk, public_witness, &proof.bsb22_commitments)?;
    let gamma = derive_randomness(&mut fs, GAMMA_LABEL, &[])?;

    let beta = derive_randomness(&mut fs, BETA_LABEL, &proof.lro)?;
    let alpha = derive_randomness(&mut fs, ALPHA_LABEL, &[proof.z])?;
    let zeta = derive_randomness(&mut fs, ZETA_LABEL, &proof.h)?;

    Ok(PlonkChallenges {
        gamma,
        beta,
        alpha,
        zeta,
    })
}

/// The non-standard variant: beta is a constant and gamma only binds the
/// wire commitments, so the challenges do not depend on the verifying key
/// or the public witness.
fn derive_constant_beta_challenges(proof: &Proof, beta: u64) -> Result<PlonkChallenges> {
    if !proof.bsb22_commitments.is_empty() {
        return Err(PlonkError::MalformedProof(
            "BSB22 commitments need a derived beta".into(),
        ));
    }
    let mut fs = Sha256Transcript::new(&[GAMMA_LABEL, ALPHA_LABEL, ZETA_LABEL]);

    let gamma = derive_randomness(&mut fs, GAMMA_LABEL, &proof.lro)?;
    let alpha = derive_randomness(&mut fs, ALPHA_LABEL, &[proof.z])?;
    let zeta = derive_randomness(&mut fs, ZETA_LABEL, &proof.h)?;

    Ok(PlonkChallenges {
        gamma,
        beta: BN254Scalar::from(beta),
        alpha,
        zeta,
    })
}

/// Bind the permutation and selector commitments of `vk`, the public
/// witness and the BSB22 commitments to `challenge`.
fn bind_public_data(
    fs: &mut Sha256Transcript,
    challenge: &str,
    vk: &VerifyingKey,
    public_witness: &[BN254Scalar],
    bsb22_commitments: &[BN254G1],
) -> Result<()> {
    let key_commitments = vk
        .s
        .iter()
        .chain([&vk.ql, &vk.qr, &vk.qm, &vk.qo, &vk.qk]);
    for commitment in key_commitments {
        fs.bind(challenge, &commitment.to_gnark_compressed_bytes())?;
    }

    for w in public_witness {
        fs.bind(challenge, &w.to_be_bytes())?;
    }

    for commitment in bsb22_commitments {
        fs.bind(challenge, &commitment.to_gnark_compressed_bytes())?;
    }
    Ok(())
}

/// Bind `points` (raw encoding) to `challenge` and compute it.
fn derive_randomness(
    fs: &mut Sha256Transcript,
    challenge: &str,
    points: &[BN254G1],
) -> Result<BN254Scalar> {
    for point in points {
        fs.bind(challenge, &point.to_raw_bytes())?;
    }
    let bytes = fs.compute_challenge(challenge)?;
    Ok(challenge_scalar(&bytes))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fiat_shamir::TranscriptError;
    use crate::plonk::proof::Proof;
    use crate::poly_commit::kzg_poly_com::{
        KZGBatchOpeningProof, KZGCommitmentSchemeBN254, KZGOpenProof,
    };
    use sha2::{Digest, Sha256};

    fn sample() -> (Proof, VerifyingKey) {
        let mut prng = test_rng();
        let mut point = || BN254G1::random(&mut prng);
        let proof = Proof {
            lro: [point(), point(), point()],
            z: point(),
            h: [point(), point(), point()],
            bsb22_commitments: vec![],
            batched_proof: KZGBatchOpeningProof {
                h: point(),
                claimed_values: vec![BN254Scalar::one(); 7],
            },
            z_shifted_opening: KZGOpenProof {
                h: point(),
                claimed_value: BN254Scalar::one(),
            },
        };
        let s = [point(), point(), point()];
        let (ql, qr, qm, qo, qk) = (point(), point(), point(), point(), point());
        let kzg = KZGCommitmentSchemeBN254::new(2, &mut test_rng());
        let vk = VerifyingKey::new(4, 1, &kzg, s, ql, qr, qm, qo, qk, vec![], vec![]).unwrap();
        (proof, vk)
    }

    #[test]
    fn challenges_are_deterministic() {
        let (proof, vk) = sample();
        let pw = [BN254Scalar::from(3u32)];
        let options = VerifierOptions::default();
        let a = derive_challenges(&proof, &vk, &pw, &options).unwrap();
        let b = derive_challenges(&proof, &vk, &pw, &options).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.gamma, a.beta);
        assert_ne!(a.alpha, a.zeta);
    }

    #[test]
    fn gamma_hashes_label_and_public_data() {
        let (proof, vk) = sample();
        let pw = [BN254Scalar::from(3u32)];
        let challenges = derive_challenges(&proof, &vk, &pw, &VerifierOptions::default()).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(b"gamma");
        for c in vk.s.iter().chain([&vk.ql, &vk.qr, &vk.qm, &vk.qo, &vk.qk]) {
            hasher.update(c.to_gnark_compressed_bytes());
        }
        hasher.update(pw[0].to_be_bytes());
        let gamma_digest = hasher.finalize();
        assert_eq!(
            challenges.gamma,
            BN254Scalar::from_be_bytes_mod_order(&gamma_digest)
        );

        // beta chains the unreduced gamma digest
        let mut hasher = Sha256::new();
        hasher.update(b"beta");
        hasher.update(gamma_digest);
        for c in proof.lro.iter() {
            hasher.update(c.to_raw_bytes());
        }
        assert_eq!(
            challenges.beta,
            BN254Scalar::from_be_bytes_mod_order(&hasher.finalize())
        );
    }

    #[test]
    fn each_challenge_depends_on_its_bindings() {
        let (proof, vk) = sample();
        let pw = [BN254Scalar::from(3u32)];
        let options = VerifierOptions::default();
        let base = derive_challenges(&proof, &vk, &pw, &options).unwrap();

        let other_pw = derive_challenges(&proof, &vk, &[BN254Scalar::from(4u32)], &options).unwrap();
        assert_ne!(base.gamma, other_pw.gamma);
        assert_ne!(base.zeta, other_pw.zeta);

        let mut changed = proof.clone();
        changed.z = BN254G1::get_base();
        let other_z = derive_challenges(&changed, &vk, &pw, &options).unwrap();
        assert_eq!(base.gamma, other_z.gamma);
        assert_eq!(base.beta, other_z.beta);
        assert_ne!(base.alpha, other_z.alpha);
        assert_ne!(base.zeta, other_z.zeta);

        let mut changed = proof.clone();
        changed.h[2] = BN254G1::get_identity();
        let other_h = derive_challenges(&changed, &vk, &pw, &options).unwrap();
        assert_eq!(base.alpha, other_h.alpha);
        assert_ne!(base.zeta, other_h.zeta);
    }

    #[test]
    fn constant_beta_ignores_public_data() {
        let (proof, vk) = sample();
        let options = VerifierOptions::legacy();
        let a = derive_challenges(&proof, &vk, &[BN254Scalar::from(3u32)], &options).unwrap();
        let b = derive_challenges(&proof, &vk, &[BN254Scalar::from(4u32)], &options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.beta, BN254Scalar::from(10u32));

        let mut hasher = Sha256::new();
        hasher.update(b"gamma");
        for c in proof.lro.iter() {
            hasher.update(c.to_raw_bytes());
        }
        assert_eq!(a.gamma, BN254Scalar::from_be_bytes_mod_order(&hasher.finalize()));

        let mut with_bsb22 = proof.clone();
        with_bsb22.bsb22_commitments.push(BN254G1::get_base());
        assert!(matches!(
            derive_challenges(&with_bsb22, &vk, &[], &options),
            Err(PlonkError::MalformedProof(_))
        ));
    }

    #[test]
    fn recomputing_a_challenge_fails() {
        let mut fs = Sha256Transcript::new(&[GAMMA_LABEL, BETA_LABEL]);
        derive_randomness(&mut fs, GAMMA_LABEL, &[]).unwrap();
        assert_eq!(
            derive_randomness(&mut fs, GAMMA_LABEL, &[]),
            Err(PlonkError::Transcript(
                TranscriptError::ChallengeAlreadyComputed(GAMMA_LABEL.to_string())
            ))
        );
    }
}
