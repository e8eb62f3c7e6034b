use rand_chacha::{
    rand_core::{CryptoRng, RngCore, SeedableRng},
    ChaChaRng,
};

fn test_rng_helper(extra: u64) -> ChaChaRng {
    // arbitrary seed
    let mut seed = [
        1, 0, 0, 0, 23, 0, 0, 0, 200, 1, 0, 0, 210, 30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    seed[24..].copy_from_slice(&extra.to_le_bytes());
    ChaChaRng::from_seed(seed)
}

/// Should be used only for tests, not for any real world usage.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    test_rng_helper(0)
}

/// Should be used only for tests, not for any real world usage.
///
/// The generator is deterministic. Setting `BNPLONK_TEST_SEED` to a number
/// selects a different, still reproducible, stream.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    let extra = std::env::var("BNPLONK_TEST_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    test_rng_helper(extra)
}
