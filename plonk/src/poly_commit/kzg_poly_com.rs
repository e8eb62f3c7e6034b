use crate::fiat_shamir::{challenge_scalar, Sha256Transcript};
use crate::poly_commit::{
    errors::PolyComSchemeError, field_polynomial::FpPolynomial, transcript::PolyComTranscript,
};
use ark_std::{end_timer, start_timer};
use bnplonk_algebra::{
    bn254::{BN254PairingEngine, BN254Scalar, BN254G1},
    prelude::*,
};
use merlin::Transcript;
use serde::{Deserialize, Serialize};

type Result<T> = core::result::Result<T, PolyComSchemeError>;

/// The name of the only challenge of the folding transcript.
const FOLD_CHALLENGE: &str = "gamma";

/// KZG opening proof of one polynomial at one point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct KZGOpenProof<G: Group> {
    /// Commitment to the quotient `(f(X) - f(z)) / (X - z)`.
    pub h: G,
    /// The claimed evaluation `f(z)`.
    pub claimed_value: G::ScalarType,
}

/// KZG opening proof of several polynomials at the same point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct KZGBatchOpeningProof<G: Group> {
    /// Commitment to the quotient of the folded polynomial.
    pub h: G,
    /// The claimed evaluations, one per polynomial.
    pub claimed_values: Vec<G::ScalarType>,
}

/// KZG commitment scheme about `PairingEngine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KZGCommitmentScheme<P: Pairing> {
    /// public parameter about G1.
    pub public_parameter_group_1: Vec<P::G1>,
    /// public parameter about G2.
    pub public_parameter_group_2: Vec<P::G2>,
}

impl<P: Pairing> KZGCommitmentScheme<P> {
    /// Create a new instance of a KZG polynomial commitment scheme.
    /// `max_degree` - max degree of the polynomial,
    /// `prng` - pseudo-random generator.
    ///
    /// The trapdoor is sampled from `prng` and dropped, which is only fit for tests.
    pub fn new<R: CryptoRng + RngCore>(max_degree: usize, prng: &mut R) -> KZGCommitmentScheme<P> {
        let s = P::ScalarField::random(prng);

        let mut public_parameter_group_1: Vec<P::G1> = Vec::with_capacity(max_degree + 1);

        let mut elem_g1 = P::G1::get_base();

        for _ in 0..=max_degree {
            public_parameter_group_1.push(elem_g1);
            elem_g1 = elem_g1.mul(&s);
        }

        let elem_g2 = P::G2::get_base();
        let public_parameter_group_2 = vec![elem_g2, elem_g2.mul(&s)];

        KZGCommitmentScheme {
            public_parameter_group_1,
            public_parameter_group_2,
        }
    }

    /// Return the maximal degree of a committed polynomial.
    pub fn max_degree(&self) -> usize {
        self.public_parameter_group_1.len().saturating_sub(1)
    }

    /// Return `([1]G1, [1]G2, [τ]G2)`, the part of the parameters the verifier uses.
    fn verifier_params(&self) -> Result<(&P::G1, &P::G2, &P::G2)> {
        match (
            self.public_parameter_group_1.first(),
            self.public_parameter_group_2.get(0),
            self.public_parameter_group_2.get(1),
        ) {
            (Some(g1), Some(g2), Some(tau_g2)) => Ok((g1, g2, tau_g2)),
            _ => Err(PolyComSchemeError::InvalidParameters),
        }
    }

    /// Keep only the parameters the verifier needs.
    pub fn shrink_to_verifier_only(&self) -> Result<Self> {
        let (g1, g2, tau_g2) = self.verifier_params()?;
        Ok(Self {
            public_parameter_group_1: vec![*g1],
            public_parameter_group_2: vec![*g2, *tau_g2],
        })
    }

    /// Commit to a polynomial.
    pub fn commit(&self, polynomial: &FpPolynomial<P::ScalarField>) -> Result<P::G1> {
        let coefs = polynomial.get_coefs_ref();

        if coefs.len() > self.public_parameter_group_1.len() {
            return Err(PolyComSchemeError::DegreeError);
        }

        let coefs_ref: Vec<&P::ScalarField> = coefs.iter().collect();
        let pub_param_group_1_as_ref: Vec<&P::G1> = self.public_parameter_group_1
            [0..coefs.len()]
            .iter()
            .collect();

        Ok(P::G1::multi_exp(&coefs_ref[..], &pub_param_group_1_as_ref[..]))
    }

    /// Open a polynomial at `point`.
    pub fn open(
        &self,
        polynomial: &FpPolynomial<P::ScalarField>,
        point: &P::ScalarField,
    ) -> Result<KZGOpenProof<P::G1>> {
        let claimed_value = polynomial.eval(point);
        let h = self.quotient_commitment(polynomial, point, &claimed_value)?;
        Ok(KZGOpenProof { h, claimed_value })
    }

    /// Commit to `(f(X) - f(x)) / (X - x)`.
    fn quotient_commitment(
        &self,
        polynomial: &FpPolynomial<P::ScalarField>,
        point: &P::ScalarField,
        eval: &P::ScalarField,
    ) -> Result<P::G1> {
        if polynomial.degree() > self.max_degree() {
            return Err(PolyComSchemeError::DegreeError);
        }

        // f(X) - f(x)
        let nominator = polynomial.sub(&FpPolynomial::from_coefs(vec![*eval]));

        // X - x
        let vanishing_poly = FpPolynomial::from_coefs(vec![point.neg(), P::ScalarField::one()]);
        let (q_poly, r_poly) = nominator
            .div_rem(&vanishing_poly)
            .ok_or(PolyComSchemeError::PCSProveEvalError)?;

        if !r_poly.is_zero() {
            return Err(PolyComSchemeError::PCSProveEvalError);
        }

        self.commit(&q_poly)
    }

    /// Verify an opening proof of `digest` at `point`.
    pub fn verify(
        &self,
        digest: &P::G1,
        proof: &KZGOpenProof<P::G1>,
        point: &P::ScalarField,
    ) -> Result<()> {
        let (g1, g2, tau_g2) = self.verifier_params()?;

        // [f(τ) - f(z) + z·H(τ)]G1
        let total = digest.sub(&g1.mul(&proof.claimed_value)).add(&proof.h.mul(point));

        let pairing_eval =
            P::product_of_pairings(&[total, proof.h.neg()], &[*g2, *tau_g2]);

        if pairing_eval == P::Gt::get_identity() {
            Ok(())
        } else {
            Err(PolyComSchemeError::PairingCheckFailed)
        }
    }

    /// Verify openings of several digests at distinct points with a single
    /// product of two pairings, using a random linear combination.
    pub fn batch_verify_multi_points(
        &self,
        digests: &[P::G1],
        proofs: &[KZGOpenProof<P::G1>],
        points: &[P::ScalarField],
    ) -> Result<()> {
        if digests.is_empty() || digests.len() != proofs.len() || digests.len() != points.len()
        {
            return Err(PolyComSchemeError::InvalidParameters);
        }
        if digests.len() == 1 {
            return self.verify(&digests[0], &proofs[0], &points[0]);
        }
        let (g1, g2, tau_g2) = self.verifier_params()?;

        let timer = start_timer!(|| "KZG batch verify multi points");

        // The combination scalar depends on every input.
        let mut transcript = Transcript::new(b"KZG batch verify multi points");
        for ((digest, proof), point) in digests
            .iter()
            .zip_eq(proofs.iter())
            .zip_eq(points.iter())
        {
            transcript.append_commitment(digest);
            transcript.append_commitment(&proof.h);
            transcript.append_field_elem(&proof.claimed_value);
            transcript.append_field_elem(point);
        }
        let r: P::ScalarField = transcript.get_challenge_field_elem(b"random combination");

        let mut combiners = Vec::with_capacity(digests.len());
        let mut cur = P::ScalarField::one();
        for _ in 0..digests.len() {
            combiners.push(cur);
            cur.mul_assign(&r);
        }

        let combiners_ref: Vec<&P::ScalarField> = combiners.iter().collect();
        let digests_ref: Vec<&P::G1> = digests.iter().collect();
        let quotients_ref: Vec<&P::G1> = proofs.iter().map(|p| &p.h).collect();

        let folded_digests = P::G1::multi_exp(&combiners_ref, &digests_ref);
        let folded_quotients = P::G1::multi_exp(&combiners_ref, &quotients_ref);

        let folded_evals: P::ScalarField = combiners
            .iter()
            .zip_eq(proofs.iter())
            .map(|(c, p)| c.mul(&p.claimed_value))
            .sum();

        let combined_points: Vec<P::ScalarField> = combiners
            .iter()
            .zip_eq(points.iter())
            .map(|(c, z)| c.mul(z))
            .collect();
        let combined_points_ref: Vec<&P::ScalarField> = combined_points.iter().collect();
        let folded_points_quotients = P::G1::multi_exp(&combined_points_ref, &quotients_ref);

        // Σ rᵢ·(Dᵢ - [vᵢ]G1 + zᵢ·Hᵢ)
        let lhs = folded_digests
            .sub(&g1.mul(&folded_evals))
            .add(&folded_points_quotients);

        let pairing_eval =
            P::product_of_pairings(&[lhs, folded_quotients.neg()], &[*g2, *tau_g2]);
        end_timer!(timer);

        if pairing_eval == P::Gt::get_identity() {
            Ok(())
        } else {
            Err(PolyComSchemeError::PairingCheckFailed)
        }
    }
}

/// KZG commitment scheme over the BN254 curve
pub type KZGCommitmentSchemeBN254 = KZGCommitmentScheme<BN254PairingEngine>;

impl KZGCommitmentSchemeBN254 {
    /// Open several polynomials at the same point with one quotient commitment.
    /// `digests` are the commitments of `polynomials`, in the same order.
    pub fn batch_open_single_point(
        &self,
        polynomials: &[FpPolynomial<BN254Scalar>],
        digests: &[BN254G1],
        point: &BN254Scalar,
    ) -> Result<KZGBatchOpeningProof<BN254G1>> {
        if polynomials.len() != digests.len() {
            return Err(PolyComSchemeError::InvalidNbDigests);
        }
        if polynomials.is_empty() {
            return Err(PolyComSchemeError::InvalidParameters);
        }

        let claimed_values: Vec<BN254Scalar> = polynomials.iter().map(|p| p.eval(point)).collect();
        let gamma = derive_fold_gamma(point, digests, &claimed_values)?;

        let mut folded_polynomial = FpPolynomial::zero();
        let mut folded_eval = BN254Scalar::zero();
        let mut gamma_i = BN254Scalar::one();
        for (polynomial, value) in polynomials.iter().zip_eq(claimed_values.iter()) {
            folded_polynomial.add_assign(&polynomial.mul_scalar(&gamma_i));
            folded_eval.add_assign(&value.mul(&gamma_i));
            gamma_i.mul_assign(&gamma);
        }

        let h = self.quotient_commitment(&folded_polynomial, point, &folded_eval)?;
        Ok(KZGBatchOpeningProof { h, claimed_values })
    }

    /// Fold a batch opening proof at `point` and its digests into a single
    /// opening proof and digest, using powers of a Fiat-Shamir challenge
    /// bound to the point, the digests and the claimed values.
    pub fn fold_proof(
        digests: &[BN254G1],
        batch_proof: &KZGBatchOpeningProof<BN254G1>,
        point: &BN254Scalar,
    ) -> Result<(KZGOpenProof<BN254G1>, BN254G1)> {
        if digests.len() != batch_proof.claimed_values.len() {
            return Err(PolyComSchemeError::InvalidNbDigests);
        }

        let gamma = derive_fold_gamma(point, digests, &batch_proof.claimed_values)?;

        let mut gamma_i = Vec::with_capacity(digests.len());
        let mut cur = BN254Scalar::one();
        for _ in 0..digests.len() {
            gamma_i.push(cur);
            cur.mul_assign(&gamma);
        }

        let gamma_i_ref: Vec<&BN254Scalar> = gamma_i.iter().collect();
        let digests_ref: Vec<&BN254G1> = digests.iter().collect();
        let folded_digest = BN254G1::multi_exp(&gamma_i_ref, &digests_ref);
        let folded_eval: BN254Scalar = gamma_i
            .iter()
            .zip_eq(batch_proof.claimed_values.iter())
            .map(|(g, v)| g.mul(v))
            .sum();

        Ok((
            KZGOpenProof {
                h: batch_proof.h,
                claimed_value: folded_eval,
            },
            folded_digest,
        ))
    }
}

/// Derive the folding challenge from the point, the digests (compressed) and
/// the claimed values.
fn derive_fold_gamma(
    point: &BN254Scalar,
    digests: &[BN254G1],
    claimed_values: &[BN254Scalar],
) -> Result<BN254Scalar> {
    let mut fs = Sha256Transcript::new(&[FOLD_CHALLENGE]);
    let mut bind = |bytes: &[u8]| {
        fs.bind(FOLD_CHALLENGE, bytes)
            .map_err(|_| PolyComSchemeError::InvalidParameters)
    };
    bind(&point.to_be_bytes())?;
    for digest in digests {
        bind(&digest.to_gnark_compressed_bytes())?;
    }
    for value in claimed_values {
        bind(&value.to_be_bytes())?;
    }
    let bytes = fs
        .compute_challenge(FOLD_CHALLENGE)
        .map_err(|_| PolyComSchemeError::InvalidParameters)?;
    Ok(challenge_scalar(&bytes))
}
