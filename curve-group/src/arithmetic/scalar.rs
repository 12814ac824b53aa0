use super::modular::{to_biguint, u256_from_be_padded, Modular};
use crate::Curve;

use bigint::{NonZero, U256};
use num_bigint::BigUint;
use zeroize::Zeroize;

use std::marker::PhantomData;

/// Integer modulo the group order of `C`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scalar<C: Curve>(pub(crate) U256, pub(crate) PhantomData<C>);

impl<C: Curve> Scalar<C> {
    pub const ZERO: Self = Self(U256::ZERO, PhantomData);
    pub const ONE: Self = Self(U256::ONE, PhantomData);

    /// Big-endian bytes of arbitrary length, reduced modulo the order.
    pub fn from_be_bytes_reduced(bytes: &[u8]) -> Self {
        if bytes.len() <= 32 {
            return Self::new(u256_from_be_padded(bytes));
        }
        let reduced = BigUint::from_bytes_be(bytes) % to_biguint(&C::ORDER);
        Self::new(u256_from_be_padded(&reduced.to_bytes_be()))
    }

    /// Returns `None` unless `number` is already reduced.
    pub fn from_canonical(number: U256) -> Option<Self> {
        if number < C::ORDER {
            Some(Self(number, PhantomData))
        } else {
            None
        }
    }
}

impl<C: Curve> Modular for Scalar<C> {
    const MODULUS: U256 = C::ORDER;

    fn new(number: U256) -> Self {
        let reduced = if number < Self::MODULUS {
            number
        } else {
            // NOTE unwrap is fine here because the order
            // can be safely assumed to be nonzero
            number % NonZero::new(Self::MODULUS).unwrap()
        };

        Self(reduced, PhantomData)
    }

    fn inner(&self) -> &U256 {
        &self.0
    }
}

impl<C: Curve> Zeroize for Scalar<C> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<C: Curve> std::ops::Add for Scalar<C> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        self.add_mod(&rhs)
    }
}

impl<C: Curve> std::ops::Sub for Scalar<C> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_mod(&rhs)
    }
}

impl<C: Curve> std::ops::Neg for Scalar<C> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.neg_mod()
    }
}

impl<C: Curve> std::ops::Mul for Scalar<C> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_mod(&rhs)
    }
}

impl<'a, 'b, C: Curve> std::ops::Mul<&'b Scalar<C>> for &'a Scalar<C> {
    type Output = Scalar<C>;
    fn mul(self, rhs: &'b Scalar<C>) -> Self::Output {
        self.mul_mod(rhs)
    }
}
