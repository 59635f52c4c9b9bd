//! Folding a hash digest into a scalar of a given bit width.

use num_bigint::BigUint;

/// The integer formed by the leftmost `bit_width` bits of `digest`, read
/// big-endian. A digest shorter than `bit_width` bits is used whole. The
/// result is deliberately not reduced mod the group order; reduction happens
/// where the scalar is consumed.
pub fn leftmost_bits(digest: &[u8], bit_width: u64) -> BigUint {
    let value = BigUint::from_bytes_be(digest);
    let digest_bits = digest.len() as u64 * 8;
    if digest_bits > bit_width {
        value >> (digest_bits - bit_width)
    } else {
        value
    }
}
