use crate::errors::{PlonkError, Result};
use crate::poly_commit::kzg_poly_com::{KZGBatchOpeningProof, KZGOpenProof};
use bnplonk_algebra::bn254::{BN254Scalar, BN254G1};
use serde::{Deserialize, Serialize};

/// The number of claimed values of the batched opening that do not belong
/// to custom gates.
pub const NB_FIXED_CLAIMED_VALUES: usize = 7;

/// A proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// The commitments to the left, right and output wires.
    pub lro: [BN254G1; 3],
    /// The commitment to the permutation grand product.
    pub z: BN254G1,
    /// The commitments to the three parts of the quotient.
    pub h: [BN254G1; 3],
    /// The BSB22 commitments of the custom gates.
    pub bsb22_commitments: Vec<BN254G1>,
    /// The opening at `zeta` of the folded quotient, the linearized
    /// polynomial, the wires, the first two permutation polynomials and the
    /// custom gate selectors, in this order.
    pub batched_proof: KZGBatchOpeningProof<BN254G1>,
    /// The opening of the grand product at `zeta * generator`.
    pub z_shifted_opening: KZGOpenProof<BN254G1>,
}

/// The evaluations claimed by a proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofEvaluations {
    /// The quotient at `zeta`.
    pub quotient: BN254Scalar,
    /// The linearized polynomial at `zeta`.
    pub linearized_polynomial: BN254Scalar,
    /// The left wire at `zeta`.
    pub l: BN254Scalar,
    /// The right wire at `zeta`.
    pub r: BN254Scalar,
    /// The output wire at `zeta`.
    pub o: BN254Scalar,
    /// The first permutation polynomial at `zeta`.
    pub s1: BN254Scalar,
    /// The second permutation polynomial at `zeta`.
    pub s2: BN254Scalar,
    /// The custom gate selectors at `zeta`.
    pub qcp: Vec<BN254Scalar>,
    /// The grand product at `zeta * generator`.
    pub z_shifted: BN254Scalar,
}

impl ProofEvaluations {
    /// Name the claimed values of `proof`, checking there is one per
    /// committed polynomial.
    pub fn parse(proof: &Proof) -> Result<Self> {
        let values = &proof.batched_proof.claimed_values;
        let expected = NB_FIXED_CLAIMED_VALUES + proof.bsb22_commitments.len();
        if values.len() != expected {
            return Err(PlonkError::MalformedProof(format!(
                "expected {} claimed values, got {}",
                expected,
                values.len()
            )));
        }

        Ok(ProofEvaluations {
            quotient: values[0],
            linearized_polynomial: values[1],
            l: values[2],
            r: values[3],
            o: values[4],
            s1: values[5],
            s2: values[6],
            qcp: values[NB_FIXED_CLAIMED_VALUES..].to_vec(),
            z_shifted: proof.z_shifted_opening.claimed_value,
        })
    }
}
