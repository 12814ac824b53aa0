//! Rejection sampling helpers shared by scalar and point picking.

use crate::Error;

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

/// Upper bound on the candidates drawn by any rejection sampling loop.
pub const MAX_ATTEMPTS: usize = 1 << 16;

/// Draws `ceil(bit_len / 8)` random bytes whose big-endian value fits in
/// `bit_len` bits. If `exact` is set, the highest of those bits is forced
/// to one.
pub fn bits<R: RngCore + CryptoRng>(bit_len: usize, exact: bool, rng: &mut R) -> Vec<u8> {
    let mut bytes = vec![0u8; (bit_len + 7) >> 3];
    rng.fill_bytes(&mut bytes);

    let high_bits = bit_len & 7;
    if let Some(first) = bytes.first_mut() {
        if high_bits != 0 {
            *first &= !(0xff << high_bits);
        }
        if exact {
            if high_bits != 0 {
                *first |= 1 << (high_bits - 1);
            } else {
                *first |= 0x80;
            }
        }
    }

    bytes
}

/// Big-endian bytes of a uniform integer `v` with `0 < v < modulus`.
///
/// Candidates are drawn with [`bits`] until one falls in range, at most
/// [`MAX_ATTEMPTS`] times.
pub fn int<R: RngCore + CryptoRng>(modulus: &BigUint, rng: &mut R) -> Result<Vec<u8>, Error> {
    if *modulus < BigUint::from(2u8) {
        return Err(Error::InvalidParameters("sampling modulus must be at least 2"));
    }

    let bit_len = modulus.bits() as usize;
    for attempt in 0..MAX_ATTEMPTS {
        let bytes = bits(bit_len, false, rng);
        let candidate = BigUint::from_bytes_be(&bytes);
        if candidate.bits() != 0 && candidate < *modulus {
            return Ok(bytes);
        }
        tracing::trace!(attempt, "rejected out of range candidate");
    }

    tracing::warn!(attempts = MAX_ATTEMPTS, "random integer sampling exhausted");
    Err(Error::RandomnessExhausted(MAX_ATTEMPTS))
}
