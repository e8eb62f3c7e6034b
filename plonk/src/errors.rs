use crate::fiat_shamir::TranscriptError;
use crate::poly_commit::errors::PolyComSchemeError;
use ark_std::{error, fmt, string::String};
use bnplonk_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, PlonkError>;

/// Errors returned by the verifier.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlonkError {
    /// The proof does not have the expected shape.
    MalformedProof(String),
    /// The public witness length differs from the one fixed at setup.
    InvalidWitnessLength {
        /// Number of public inputs of the circuit.
        expected: usize,
        /// Number of public inputs supplied.
        actual: usize,
    },
    /// The verifying key violates one of its invariants.
    InvalidVerifyingKey(String),
    /// Fiat-Shamir transcript error.
    Transcript(TranscriptError),
    /// The claimed quotient evaluation is not the expected one.
    QuotientMismatch,
    /// The batched opening pairing equation does not hold.
    PairingCheckFailed,
    /// Division by zero or evaluation on the domain.
    ArithmeticError(String),
    /// Algebra error.
    Algebra(AlgebraError),
    /// Polynomial commitment error.
    PolyCom(PolyComSchemeError),
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlonkError::*;
        match self {
            MalformedProof(e) => write!(f, "Malformed proof: {}", e),
            InvalidWitnessLength { expected, actual } => write!(
                f,
                "Invalid public witness length: expected {}, got {}",
                expected, actual
            ),
            InvalidVerifyingKey(e) => write!(f, "Invalid verifying key: {}", e),
            Transcript(e) => write!(f, "Transcript: {}", e),
            QuotientMismatch => f.write_str("Claimed quotient is not as expected."),
            PairingCheckFailed => f.write_str("Pairing check failed."),
            ArithmeticError(e) => write!(f, "Arithmetic error: {}", e),
            Algebra(e) => write!(f, "Algebra: {}", e),
            PolyCom(e) => write!(f, "Polynomial commitment: {}", e),
        }
    }
}

impl error::Error for PlonkError {}

impl From<AlgebraError> for PlonkError {
    fn from(e: AlgebraError) -> PlonkError {
        PlonkError::Algebra(e)
    }
}

impl From<TranscriptError> for PlonkError {
    fn from(e: TranscriptError) -> PlonkError {
        PlonkError::Transcript(e)
    }
}

impl From<PolyComSchemeError> for PlonkError {
    fn from(e: PolyComSchemeError) -> PlonkError {
        match e {
            PolyComSchemeError::PairingCheckFailed => PlonkError::PairingCheckFailed,
            PolyComSchemeError::InvalidNbDigests => PlonkError::MalformedProof(
                "the number of digests differs from the number of claimed values".into(),
            ),
            e => PlonkError::PolyCom(e),
        }
    }
}
