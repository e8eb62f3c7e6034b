use ark_std::{
    fmt,
    marker::PhantomData,
    string::{String, ToString},
    vec::Vec,
};
use bnplonk_algebra::prelude::Scalar;
use digest::Digest;
use sha2::Sha256;

/// Errors of the Fiat-Shamir transcript.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TranscriptError {
    /// The challenge was not declared when the transcript was created.
    ChallengeNotFound(String),
    /// The challenge has already been computed.
    ChallengeAlreadyComputed(String),
    /// The challenge declared before this one has not been computed yet.
    PreviousChallengeNotComputed(String),
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TranscriptError::*;
        match self {
            ChallengeNotFound(id) => write!(f, "challenge {} not found", id),
            ChallengeAlreadyComputed(id) => write!(f, "challenge {} already computed", id),
            PreviousChallengeNotComputed(id) => {
                write!(f, "the challenge before {} is not computed", id)
            }
        }
    }
}

impl ark_std::error::Error for TranscriptError {}

#[derive(Debug, Clone)]
struct Challenge {
    id: String,
    bindings: Vec<Vec<u8>>,
    value: Option<Vec<u8>>,
}

/// A Fiat-Shamir transcript with a fixed, ordered list of named challenges.
///
/// Each challenge is the digest of its name, the value of the previous
/// challenge (for all but the first one) and the bytes bound to it, in order.
#[derive(Debug, Clone)]
pub struct Transcript<D: Digest> {
    challenges: Vec<Challenge>,
    _digest: PhantomData<D>,
}

/// The transcript used by the verifier.
pub type Sha256Transcript = Transcript<Sha256>;

impl<D: Digest> Transcript<D> {
    /// Create a transcript for the given challenges, in the order they will
    /// be computed.
    pub fn new(challenge_ids: &[&str]) -> Self {
        Self {
            challenges: challenge_ids
                .iter()
                .map(|id| Challenge {
                    id: id.to_string(),
                    bindings: Vec::new(),
                    value: None,
                })
                .collect(),
            _digest: PhantomData,
        }
    }

    fn position(&self, id: &str) -> Result<usize, TranscriptError> {
        self.challenges
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TranscriptError::ChallengeNotFound(id.to_string()))
    }

    /// Append `bytes` to the data that challenge `id` is derived from.
    pub fn bind(&mut self, id: &str, bytes: &[u8]) -> Result<(), TranscriptError> {
        let pos = self.position(id)?;
        let challenge = &mut self.challenges[pos];
        if challenge.value.is_some() {
            return Err(TranscriptError::ChallengeAlreadyComputed(id.to_string()));
        }
        challenge.bindings.push(bytes.to_vec());
        Ok(())
    }

    /// Compute the challenge `id` and return the raw digest.
    pub fn compute_challenge(&mut self, id: &str) -> Result<Vec<u8>, TranscriptError> {
        let pos = self.position(id)?;
        if self.challenges[pos].value.is_some() {
            return Err(TranscriptError::ChallengeAlreadyComputed(id.to_string()));
        }

        let mut hasher = D::new();
        hasher.update(id.as_bytes());
        if pos > 0 {
            match &self.challenges[pos - 1].value {
                Some(previous) => hasher.update(previous),
                None => {
                    return Err(TranscriptError::PreviousChallengeNotComputed(
                        id.to_string(),
                    ))
                }
            }
        }
        for binding in self.challenges[pos].bindings.iter() {
            hasher.update(binding);
        }

        let value = hasher.finalize().to_vec();
        self.challenges[pos].value = Some(value.clone());
        Ok(value)
    }
}

/// Read a challenge digest as a big-endian integer reduced modulo the field order.
pub fn challenge_scalar<S: Scalar>(bytes: &[u8]) -> S {
    S::from_be_bytes_mod_order(bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use bnplonk_algebra::bn254::BN254Scalar;

    #[test]
    fn challenge_is_hash_of_name_previous_and_bindings() {
        let mut fs = Sha256Transcript::new(&["gamma", "beta"]);
        fs.bind("gamma", b"one").unwrap();
        fs.bind("gamma", b"two").unwrap();
        let gamma = fs.compute_challenge("gamma").unwrap();

        let mut h = Sha256::new();
        h.update(b"gamma");
        h.update(b"one");
        h.update(b"two");
        assert_eq!(gamma, h.finalize().to_vec());

        fs.bind("beta", b"three").unwrap();
        let beta = fs.compute_challenge("beta").unwrap();
        let mut h = Sha256::new();
        h.update(b"beta");
        h.update(&gamma);
        h.update(b"three");
        assert_eq!(beta, h.finalize().to_vec());
    }

    #[test]
    fn ordering_is_enforced() {
        let mut fs = Sha256Transcript::new(&["gamma", "beta"]);
        assert_eq!(
            fs.compute_challenge("beta"),
            Err(TranscriptError::PreviousChallengeNotComputed("beta".into()))
        );
        assert_eq!(
            fs.bind("alpha", b""),
            Err(TranscriptError::ChallengeNotFound("alpha".into()))
        );

        fs.compute_challenge("gamma").unwrap();
        assert_eq!(
            fs.compute_challenge("gamma"),
            Err(TranscriptError::ChallengeAlreadyComputed("gamma".into()))
        );
        assert_eq!(
            fs.bind("gamma", b"late"),
            Err(TranscriptError::ChallengeAlreadyComputed("gamma".into()))
        );
        assert!(fs.compute_challenge("beta").is_ok());
    }

    #[test]
    fn challenges_are_deterministic() {
        let run = || {
            let mut fs = Sha256Transcript::new(&["zeta"]);
            fs.bind("zeta", &[1, 2, 3]).unwrap();
            challenge_scalar::<BN254Scalar>(&fs.compute_challenge("zeta").unwrap())
        };
        assert_eq!(run(), run());
    }
}
