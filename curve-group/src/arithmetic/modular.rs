use bigint::{Encoding, NonZero, U256, U512};
use num_bigint::BigUint;

pub trait Modular: Sized + Copy + PartialEq {
    const MODULUS: U256;

    fn new(number: U256) -> Self;

    fn inner(&self) -> &U256;

    fn is_zero(&self) -> bool {
        self.inner() == &U256::ZERO
    }

    fn add_mod(&self, other: &Self) -> Self {
        Self::new(self.inner().add_mod(other.inner(), &Self::MODULUS))
    }

    fn neg_mod(&self) -> Self {
        Self::new(self.inner().neg_mod(&Self::MODULUS))
    }

    fn sub_mod(&self, other: &Self) -> Self {
        Self::new(self.inner().sub_mod(other.inner(), &Self::MODULUS))
    }

    fn mul_mod(&self, other: &Self) -> Self {
        Self::new(mul_mod_u256(self.inner(), other.inner(), &Self::MODULUS))
    }

    fn square(&self) -> Self {
        self.mul_mod(self)
    }

    /// Left-to-right square and multiply. Variable time.
    fn pow(&self, exponent: &U256) -> Self {
        let mut result = Self::new(U256::ONE);
        for byte in exponent.to_be_bytes() {
            for i in (0..8).rev() {
                result = result.square();
                if (byte >> i) & 1 == 1 {
                    result = result.mul_mod(self);
                }
            }
        }
        result
    }

    /// Inverse via Fermat's little theorem, the modulus must be prime.
    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.pow(&Self::MODULUS.wrapping_sub(&U256::from_u8(2))))
        }
    }
}

pub fn mul_mod_u256(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    // U512::from((hi, lo)) concatenates, so the first half is the high one
    // NOTE modulus is never zero, so unwrap is fine here
    let mod512 = NonZero::new(U512::from((U256::ZERO, *modulus))).unwrap();
    let (lo, hi) = lhs.mul_wide(rhs);
    let product = U512::from((hi, lo));
    // the remainder is below the modulus, so its upper half is zero
    let remainder = (product % mod512).to_be_bytes();
    U256::from_be_slice(&remainder[32..])
}

/// Number of significant bits.
pub fn bit_length(number: &U256) -> usize {
    let bytes = number.to_be_bytes();
    match bytes.iter().position(|byte| *byte != 0) {
        Some(i) => (bytes.len() - i) * 8 - bytes[i].leading_zeros() as usize,
        None => 0,
    }
}

pub fn is_odd(number: &U256) -> bool {
    number.to_be_bytes()[31] & 1 == 1
}

/// Loads at most 32 big-endian bytes, left-padding with zeros.
pub fn u256_from_be_padded(bytes: &[u8]) -> U256 {
    debug_assert!(bytes.len() <= 32);
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    U256::from_be_bytes(padded)
}

/// The lowest `len` bytes of the big-endian encoding.
pub fn u256_to_be_trimmed(number: &U256, len: usize) -> Vec<u8> {
    number.to_be_bytes()[32 - len..].to_vec()
}

pub fn to_biguint(number: &U256) -> BigUint {
    BigUint::from_bytes_be(&number.to_be_bytes())
}
