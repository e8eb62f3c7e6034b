use ark_std::fmt;

/// Polynomial commitment scheme errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PolyComSchemeError {
    /// The number of digests and of claimed values differ.
    InvalidNbDigests,
    /// The degree of the polynomial is higher than the maximum degree allowed.
    DegreeError,
    /// It is not possible to compute the proof as F(x) != y.
    PCSProveEvalError,
    /// The pairing equation of an opening does not hold.
    PairingCheckFailed,
    /// The inputs or the public parameters are inconsistent.
    InvalidParameters,
}

impl fmt::Display for PolyComSchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PolyComSchemeError::InvalidNbDigests => {
                "The number of digests differs from the number of claimed values."
            }
            PolyComSchemeError::DegreeError => {
                "The degree of the polynomial is higher than the maximum degree allowed."
            }
            PolyComSchemeError::PCSProveEvalError => {
                "It is not possible to compute the proof as F(x) != y."
            }
            PolyComSchemeError::PairingCheckFailed => "The pairing check does not hold.",
            PolyComSchemeError::InvalidParameters => {
                "The inputs or the public parameters are inconsistent."
            }
        };

        write!(f, "{}", c)
    }
}

impl ark_std::error::Error for PolyComSchemeError {}
