//! A verifier for PLONK proofs over BN254 produced by gnark, with KZG
//! polynomial commitments.
#![deny(unused_must_use)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]

/// Module for error handling.
pub mod errors;

/// Module for the Fiat-Shamir transcript.
pub mod fiat_shamir;

/// Module for the PLONK verifier.
pub mod plonk;

/// Module for polynomial commitments.
pub mod poly_commit;
