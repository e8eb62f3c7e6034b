/// The number of bytes for a scalar value over BN254.
pub const BN254_SCALAR_LEN: usize = 32;

/// The number of bytes of a G1 point in the compressed gnark encoding.
pub const BN254_G1_COMPRESSED_LEN: usize = 32;

/// The number of bytes of a G1 point in the raw (uncompressed) gnark encoding.
pub const BN254_G1_RAW_LEN: usize = 64;

mod fr;
pub use fr::*;

mod g1;
pub use g1::*;

mod g2;
pub use g2::*;

mod gt;
pub use gt::*;

mod pairing;
pub use pairing::*;
