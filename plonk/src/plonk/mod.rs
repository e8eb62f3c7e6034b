/// Module for the arithmetic shared by the verifier stages.
pub(crate) mod helpers;

/// Module for proofs and their claimed evaluations.
pub mod proof;

/// Module for the Fiat-Shamir challenges of the protocol.
pub mod transcript;

/// Module for the verifier.
pub mod verifier;

/// Module for the verifying key.
pub mod verifying_key;

pub use helpers::{bsb22_hash, BSB22_HASH_DST};
