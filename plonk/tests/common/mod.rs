//! A reference prover for toy circuits, producing proofs in the layout the
//! verifier expects. There is no blinding and the SRS trapdoor comes from the
//! test RNG, so none of this is fit for production.
#![allow(dead_code)]

use bnplonk::plonk::{
    bsb22_hash,
    proof::Proof,
    transcript::{derive_challenges, PlonkChallenges},
    verifier::VerifierOptions,
    verifying_key::VerifyingKey,
};
use bnplonk::poly_commit::{
    field_polynomial::{primitive_nth_root_of_unity, FpPolynomial},
    kzg_poly_com::{KZGBatchOpeningProof, KZGCommitmentSchemeBN254, KZGOpenProof},
};
use bnplonk_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};

type F = BN254Scalar;
type Poly = FpPolynomial<BN254Scalar>;

/// A wire given by its column (0: left, 1: right, 2: output) and its row.
pub type Wire = (usize, usize);

/// A circuit whose row `i` enforces
/// `ql*l + qr*r + qm*l*r + qo*o + qk + sum_c qcp_c*pi2_c + PI = 0`.
#[derive(Clone, Debug)]
pub struct TestCircuit {
    pub size: usize,
    pub nb_public: usize,
    pub ql: Vec<F>,
    pub qr: Vec<F>,
    pub qm: Vec<F>,
    pub qo: Vec<F>,
    pub qk: Vec<F>,
    pub qcp: Vec<Vec<F>>,
    pub commitment_constraint_indexes: Vec<u64>,
    /// Groups of wires carrying the same value.
    pub copies: Vec<Vec<Wire>>,
}

/// The wire values and the values committed by the BSB22 commitments. The
/// left wires of the commitment constraints are filled in by the prover.
#[derive(Clone, Debug)]
pub struct TestWitness {
    pub l: Vec<F>,
    pub r: Vec<F>,
    pub o: Vec<F>,
    pub pi2: Vec<Vec<F>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProverOptions {
    pub verifier: VerifierOptions,
    /// Replace the first quotient commitment by the identity before deriving
    /// zeta, keeping the honest polynomial for the openings.
    pub zero_h0_before_zeta: bool,
}

pub struct TestProof {
    pub proof: Proof,
    pub vk: VerifyingKey,
    pub public_witness: Vec<F>,
    pub challenges: PlonkChallenges,
}

fn f(v: i64) -> F {
    if v < 0 {
        F::from((-v) as u64).neg()
    } else {
        F::from(v as u64)
    }
}

fn column(values: &[i64]) -> Vec<F> {
    values.iter().map(|v| f(*v)).collect()
}

/// A circuit of size 4 proving the knowledge of `x` with `x * x = 9`, where
/// `x` is the only public input.
pub fn x_squared_circuit() -> (TestCircuit, TestWitness) {
    let circuit = TestCircuit {
        size: 4,
        nb_public: 1,
        ql: column(&[-1, 0, 0, 0]),
        qr: column(&[0, 0, 0, 0]),
        qm: column(&[0, 1, 0, 0]),
        qo: column(&[0, -1, -1, 0]),
        qk: column(&[0, 0, 9, 0]),
        qcp: vec![],
        commitment_constraint_indexes: vec![],
        copies: vec![vec![(0, 0), (0, 1), (1, 1)], vec![(2, 1), (2, 2)]],
    };
    let witness = TestWitness {
        l: column(&[3, 3, 0, 0]),
        r: column(&[0, 3, 0, 0]),
        o: column(&[0, 9, 9, 0]),
        pi2: vec![],
    };
    (circuit, witness)
}

/// The circuit of `x_squared_circuit` on a domain of size 8, extended with a
/// custom gate whose committed values 7 and 11 are pinned by the constants.
/// The hash of the commitment sits on row 2.
pub fn bsb22_circuit() -> (TestCircuit, TestWitness) {
    let circuit = TestCircuit {
        size: 8,
        nb_public: 1,
        ql: column(&[-1, 0, -1, 0, 0, 0, 0, 0]),
        qr: column(&[0; 8]),
        qm: column(&[0, 1, 0, 0, 0, 0, 0, 0]),
        qo: column(&[0, -1, 0, 0, 0, -1, 0, 0]),
        qk: column(&[0, 0, 0, -7, -22, 9, 0, 0]),
        qcp: vec![column(&[0, 0, 0, 1, 2, 0, 0, 0])],
        commitment_constraint_indexes: vec![1],
        copies: vec![vec![(0, 0), (0, 1), (1, 1)], vec![(2, 1), (2, 5)]],
    };
    let witness = TestWitness {
        l: column(&[3, 3, 0, 0, 0, 0, 0, 0]),
        r: column(&[0, 3, 0, 0, 0, 0, 0, 0]),
        o: column(&[0, 9, 0, 0, 0, 9, 0, 0]),
        pi2: vec![column(&[0, 0, 0, 7, 11, 0, 0, 0])],
    };
    (circuit, witness)
}

fn interpolate(root: &F, values: &[F]) -> Poly {
    FpPolynomial::ffti(root, values, values.len()).unwrap()
}

fn constant(c: F) -> Poly {
    FpPolynomial::from_coefs(vec![c])
}

/// The values of the permutation polynomials: `sigma[k][i]` is
/// `mu^k' * omega^i'` where `(k', i')` is the wire following `(k, i)` in
/// its copy cycle.
fn permutation_values(circuit: &TestCircuit, omega: &F, mu: &F) -> [Vec<F>; 3] {
    let n = circuit.size;
    let label = |(k, i): Wire| mu.pow(&[k as u64]).mul(&omega.pow(&[i as u64]));

    let mut next: Vec<Wire> = (0..3 * n).map(|p| (p / n, p % n)).collect();
    for cycle in circuit.copies.iter() {
        for (j, wire) in cycle.iter().enumerate() {
            next[wire.0 * n + wire.1] = cycle[(j + 1) % cycle.len()];
        }
    }

    let sigma = |k: usize| (0..n).map(|i| label(next[k * n + i])).collect::<Vec<F>>();
    [sigma(0), sigma(1), sigma(2)]
}

/// Run the setup and the prover on `circuit` and `witness`.
pub fn prove(circuit: &TestCircuit, witness: &TestWitness, options: &ProverOptions) -> TestProof {
    let n = circuit.size;
    let mut prng = test_rng();
    let kzg = KZGCommitmentSchemeBN254::new(n + 2, &mut prng);
    let commit = |p: &Poly| kzg.commit(p).unwrap();

    let omega: F = primitive_nth_root_of_unity(n).unwrap();
    let mu = F::multiplicative_generator();
    let one = F::one();
    let zero = F::zero();

    // Setup.
    let ql = interpolate(&omega, &circuit.ql);
    let qr = interpolate(&omega, &circuit.qr);
    let qm = interpolate(&omega, &circuit.qm);
    let qo = interpolate(&omega, &circuit.qo);
    let qk = interpolate(&omega, &circuit.qk);
    let qcp: Vec<Poly> = circuit.qcp.iter().map(|q| interpolate(&omega, q)).collect();
    let sigma = permutation_values(circuit, &omega, &mu);
    let s: Vec<Poly> = sigma.iter().map(|v| interpolate(&omega, v)).collect();

    let vk = VerifyingKey::new(
        n as u64,
        circuit.nb_public as u64,
        &kzg,
        [commit(&s[0]), commit(&s[1]), commit(&s[2])],
        commit(&ql),
        commit(&qr),
        commit(&qm),
        commit(&qo),
        commit(&qk),
        qcp.iter().map(|q| commit(q)).collect(),
        circuit.commitment_constraint_indexes.clone(),
    )
    .unwrap();
    assert_eq!(vk.generator, omega);
    assert_eq!(vk.coset_shift, mu);

    // BSB22 commitments, whose hashes become public inputs.
    let pi2: Vec<Poly> = witness.pi2.iter().map(|v| interpolate(&omega, v)).collect();
    let bsb22_commitments: Vec<BN254G1> = pi2.iter().map(|p| commit(p)).collect();
    let mut l_values = witness.l.clone();
    let mut pi_values = vec![zero; n];
    pi_values[..circuit.nb_public].copy_from_slice(&witness.l[..circuit.nb_public]);
    for (c, index) in bsb22_commitments
        .iter()
        .zip(circuit.commitment_constraint_indexes.iter())
    {
        let row = circuit.nb_public + *index as usize;
        let hash = bsb22_hash(c).unwrap();
        l_values[row] = hash;
        pi_values[row] = hash;
    }
    let public_witness = witness.l[..circuit.nb_public].to_vec();
    let pi = interpolate(&omega, &pi_values);

    let wires = [l_values, witness.r.clone(), witness.o.clone()];
    let w: Vec<Poly> = wires.iter().map(|v| interpolate(&omega, v)).collect();

    let identity = BN254G1::get_identity();
    let mut proof = Proof {
        lro: [commit(&w[0]), commit(&w[1]), commit(&w[2])],
        z: identity,
        h: [identity; 3],
        bsb22_commitments,
        batched_proof: KZGBatchOpeningProof {
            h: identity,
            claimed_values: vec![],
        },
        z_shifted_opening: KZGOpenProof {
            h: identity,
            claimed_value: zero,
        },
    };
    let challenges = |proof: &Proof| {
        derive_challenges(proof, &vk, &public_witness, &options.verifier).unwrap()
    };

    // Grand product.
    let PlonkChallenges { gamma, beta, .. } = challenges(&proof);
    let mu_pow = [one, mu, mu.square()];
    let mut z_values = vec![one];
    let mut omega_i = one;
    for i in 0..n {
        let mut num = one;
        let mut den = one;
        for k in 0..3 {
            num.mul_assign(&wires[k][i].add(&beta.mul(&mu_pow[k]).mul(&omega_i)).add(&gamma));
            den.mul_assign(&wires[k][i].add(&beta.mul(&sigma[k][i])).add(&gamma));
        }
        z_values.push(z_values[i].mul(&num).mul(&den.inv().unwrap()));
        omega_i.mul_assign(&omega);
    }
    assert_eq!(z_values.pop(), Some(one), "copy constraints do not hold");
    let z = interpolate(&omega, &z_values);
    proof.z = commit(&z);

    // Quotient.
    let PlonkChallenges { alpha, .. } = challenges(&proof);
    let mut gate = ql
        .mul(&w[0])
        .add(&qr.mul(&w[1]))
        .add(&qm.mul(&w[0]).mul(&w[1]))
        .add(&qo.mul(&w[2]))
        .add(&qk)
        .add(&pi);
    for (q, p) in qcp.iter().zip(pi2.iter()) {
        gate.add_assign(&q.mul(p));
    }

    let mut permutation_shifted = z.mul_var(&omega);
    let mut permutation_id = z.clone();
    for k in 0..3 {
        let with_sigma = w[k].add(&s[k].mul_scalar(&beta)).add(&constant(gamma));
        let with_id = w[k].add(&FpPolynomial::from_coefs(vec![gamma, beta.mul(&mu_pow[k])]));
        permutation_shifted = permutation_shifted.mul(&with_sigma);
        permutation_id = permutation_id.mul(&with_id);
    }

    let mut first_values = vec![zero; n];
    first_values[0] = one;
    let l1 = interpolate(&omega, &first_values);
    let boundary = l1.mul(&z.sub(&constant(one)));

    let numerator = gate
        .add(&permutation_shifted.sub(&permutation_id).mul_scalar(&alpha))
        .add(&boundary.mul_scalar(&alpha.square()));
    let mut vanishing_coefs = vec![zero; n + 1];
    vanishing_coefs[0] = one.neg();
    vanishing_coefs[n] = one;
    let (t, rem) = numerator
        .div_rem(&FpPolynomial::from_coefs(vanishing_coefs))
        .unwrap();
    assert!(rem.is_zero(), "the constraints do not hold");

    let chunk = n + 2;
    let t_coefs = t.get_coefs_ref();
    assert!(t_coefs.len() <= 3 * chunk);
    let h: Vec<Poly> = (0..3)
        .map(|i| {
            let start = (i * chunk).min(t_coefs.len());
            let end = ((i + 1) * chunk).min(t_coefs.len());
            if start == end {
                FpPolynomial::zero()
            } else {
                FpPolynomial::from_coefs(t_coefs[start..end].to_vec())
            }
        })
        .collect();
    proof.h = [commit(&h[0]), commit(&h[1]), commit(&h[2])];
    if options.zero_h0_before_zeta {
        proof.h[0] = identity;
    }

    // Openings.
    let final_challenges = challenges(&proof);
    let zeta = final_challenges.zeta;
    let l_zeta = w[0].eval(&zeta);
    let r_zeta = w[1].eval(&zeta);
    let o_zeta = w[2].eval(&zeta);
    let s1_zeta = s[0].eval(&zeta);
    let s2_zeta = s[1].eval(&zeta);
    let zu = z.eval(&zeta.mul(&omega));
    let qcp_zeta: Vec<F> = qcp.iter().map(|q| q.eval(&zeta)).collect();

    let s3_scalar = zu
        .mul(&beta)
        .mul(&beta.mul(&s1_zeta).add(&l_zeta).add(&gamma))
        .mul(&beta.mul(&s2_zeta).add(&r_zeta).add(&gamma))
        .mul(&alpha);
    let beta_zeta = beta.mul(&zeta);
    let z_scalar = beta_zeta
        .add(&l_zeta)
        .add(&gamma)
        .mul(&beta_zeta.mul(&mu).add(&r_zeta).add(&gamma))
        .mul(&beta_zeta.mul(&mu.square()).add(&o_zeta).add(&gamma))
        .neg()
        .mul(&alpha)
        .add(&alpha.square().mul(&l1.eval(&zeta)));

    let mut linearized = ql
        .mul_scalar(&l_zeta)
        .add(&qr.mul_scalar(&r_zeta))
        .add(&qm.mul_scalar(&l_zeta.mul(&r_zeta)))
        .add(&qo.mul_scalar(&o_zeta))
        .add(&qk)
        .add(&s[2].mul_scalar(&s3_scalar))
        .add(&z.mul_scalar(&z_scalar));
    for (p, q_zeta) in pi2.iter().zip(qcp_zeta.iter()) {
        linearized.add_assign(&p.mul_scalar(q_zeta));
    }

    let zeta_n_plus_two = zeta.pow(&[chunk as u64]);
    let folded_h = h[2]
        .mul_scalar(&zeta_n_plus_two)
        .add(&h[1])
        .mul_scalar(&zeta_n_plus_two)
        .add(&h[0]);

    let mut polys = vec![
        folded_h,
        linearized,
        w[0].clone(),
        w[1].clone(),
        w[2].clone(),
        s[0].clone(),
        s[1].clone(),
    ];
    polys.extend(qcp.iter().cloned());
    let digests: Vec<BN254G1> = polys.iter().map(|p| commit(p)).collect();

    proof.batched_proof = kzg
        .batch_open_single_point(&polys, &digests, &zeta)
        .unwrap();
    proof.z_shifted_opening = kzg.open(&z, &zeta.mul(&omega)).unwrap();

    TestProof {
        proof,
        vk,
        public_witness,
        challenges: final_challenges,
    }
}
