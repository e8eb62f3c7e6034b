//! Field, group and pairing wrappers over the BN254 curve used by the
//! `bnplonk` verifier, together with the byte encodings the verifier hashes.
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_import_braces, non_shorthand_field_patterns)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::op_ref, clippy::suspicious_op_assign_impl, clippy::upper_case_acronyms)]

/// Module for the BN254 curve.
pub mod bn254;

/// Module for error handling.
pub mod errors;

/// Module for hashing byte strings into field elements.
pub mod hash_to_field;

/// Module for the prelude.
pub mod prelude;

/// Module for the deterministic test randomness.
pub mod rand_helper;

/// Module for serialization of scalars and group elements.
pub mod serialization;

/// Module for traits.
pub mod traits;

/// Module for utils.
pub mod utils;

pub use ark_std::{
    borrow, cmp, collections, fmt, hash, iter, marker, ops, rand, result, str, One, UniformRand,
    Zero,
};
