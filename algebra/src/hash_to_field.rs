use crate::prelude::*;
use digest::{core_api::BlockSizeUser, Digest};
use sha2::Sha256;

/// The number of bytes expanded per field element, `ceil((254 + 128) / 8)`.
pub const HASH_TO_FIELD_ELEMENT_LEN: usize = 48;

/// Expand `msg` into `len_in_bytes` pseudo-random bytes following
/// `expand_message_xmd` of RFC 9380.
pub fn expand_message_xmd<D: Digest + BlockSizeUser>(
    msg: &[u8],
    dst: &[u8],
    len_in_bytes: usize,
) -> Result<Vec<u8>> {
    let b_in_bytes = <D as Digest>::output_size();
    let s_in_bytes = D::block_size();

    let ell = (len_in_bytes + b_in_bytes - 1) / b_in_bytes;
    if ell > 255 || len_in_bytes > u16::MAX as usize || dst.len() > 255 {
        return Err(AlgebraError::HashToFieldLengthError);
    }

    let mut dst_prime = dst.to_vec();
    dst_prime.push(dst.len() as u8);

    let mut hasher = D::new();
    hasher.update(vec![0u8; s_in_bytes]);
    hasher.update(msg);
    hasher.update((len_in_bytes as u16).to_be_bytes());
    hasher.update([0u8]);
    hasher.update(&dst_prime);
    let b_0 = hasher.finalize();

    let mut hasher = D::new();
    hasher.update(&b_0);
    hasher.update([1u8]);
    hasher.update(&dst_prime);
    let mut b_i = hasher.finalize();

    let mut uniform_bytes = Vec::with_capacity(ell * b_in_bytes);
    uniform_bytes.extend_from_slice(&b_i);
    for i in 2..=ell {
        let mut hasher = D::new();
        let xored: Vec<u8> = b_0.iter().zip(b_i.iter()).map(|(a, b)| a ^ b).collect();
        hasher.update(xored);
        hasher.update([i as u8]);
        hasher.update(&dst_prime);
        b_i = hasher.finalize();
        uniform_bytes.extend_from_slice(&b_i);
    }

    uniform_bytes.truncate(len_in_bytes);
    Ok(uniform_bytes)
}

/// Hash `msg` into `count` scalars: each element reads
/// [`HASH_TO_FIELD_ELEMENT_LEN`] expanded bytes as a big-endian integer
/// reduced modulo the field order.
pub fn hash_to_field<S: Scalar>(msg: &[u8], dst: &[u8], count: usize) -> Result<Vec<S>> {
    let uniform_bytes =
        expand_message_xmd::<Sha256>(msg, dst, count * HASH_TO_FIELD_ELEMENT_LEN)?;
    Ok(uniform_bytes
        .chunks(HASH_TO_FIELD_ELEMENT_LEN)
        .map(S::from_be_bytes_mod_order)
        .collect())
}
