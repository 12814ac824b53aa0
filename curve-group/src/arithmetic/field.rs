use super::modular::{is_odd, Modular};
use crate::Curve;

use bigint::{NonZero, U256};

use std::marker::PhantomData;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement<C: Curve>(pub(crate) U256, pub(crate) PhantomData<C>);

impl<C: Curve> FieldElement<C> {
    pub const ONE: Self = Self(U256::ONE, PhantomData);
    pub const ZERO: Self = Self(U256::ZERO, PhantomData);

    /// Returns `None` unless `number` is already reduced.
    pub fn from_canonical(number: U256) -> Option<Self> {
        if number < C::PRIME_MODULUS {
            Some(Self(number, PhantomData))
        } else {
            None
        }
    }

    pub fn is_odd(&self) -> bool {
        is_odd(&self.0)
    }

    /// Euler's criterion.
    pub fn is_square(&self) -> bool {
        // (p - 1) / 2, p is odd
        let half = C::PRIME_MODULUS.shr_vartime(1);
        self.is_zero() || self.pow(&half) == Self::ONE
    }

    /// Tonelli-Shanks square root, `None` for quadratic non-residues.
    ///
    /// Which of the two roots is returned is not specified.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(*self);
        }
        if !self.is_square() {
            return None;
        }

        // p - 1 = q * 2^s with q odd
        let mut q = C::PRIME_MODULUS.wrapping_sub(&U256::ONE);
        let mut s = 0usize;
        while !is_odd(&q) {
            q = q.shr_vartime(1);
            s += 1;
        }

        let mut z = Self::new(U256::from_u8(2));
        while z.is_square() {
            z += Self::ONE;
        }

        let mut m = s;
        let mut c = z.pow(&q);
        let mut t = self.pow(&q);
        let mut root = self.pow(&q.wrapping_add(&U256::ONE).shr_vartime(1));

        while t != Self::ONE {
            // least i with t^(2^i) = 1, always below m for residues
            let mut i = 0usize;
            let mut t_pow = t;
            while t_pow != Self::ONE {
                t_pow = t_pow.square();
                i += 1;
            }

            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            m = i;
            c = b.square();
            t *= c;
            root *= b;
        }

        Some(root)
    }
}

impl<C: Curve> Modular for FieldElement<C> {
    const MODULUS: U256 = C::PRIME_MODULUS;

    fn new(number: U256) -> Self {
        let reduced = if number < Self::MODULUS {
            number
        } else {
            // NOTE unwrap is fine here because the modulus
            // can be safely assumed to be nonzero
            number % NonZero::new(Self::MODULUS).unwrap()
        };

        Self(reduced, PhantomData)
    }

    fn inner(&self) -> &U256 {
        &self.0
    }
}

impl<'a, 'b, C: Curve> std::ops::Add<&'b FieldElement<C>> for &'a FieldElement<C> {
    type Output = FieldElement<C>;
    fn add(self, rhs: &'b FieldElement<C>) -> Self::Output {
        self.add_mod(rhs)
    }
}

impl<C: Curve> std::ops::Add for FieldElement<C> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        self.add_mod(&rhs)
    }
}

impl<C: Curve> std::ops::AddAssign for FieldElement<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<C: Curve> std::ops::AddAssign<&FieldElement<C>> for FieldElement<C> {
    fn add_assign(&mut self, rhs: &Self) {
        *self = &*self + rhs;
    }
}

impl<C: Curve> std::ops::Sub for FieldElement<C> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_mod(&rhs)
    }
}

impl<'a, 'b, C: Curve> std::ops::Sub<&'b FieldElement<C>> for &'a FieldElement<C> {
    type Output = FieldElement<C>;
    fn sub(self, rhs: &FieldElement<C>) -> Self::Output {
        self.sub_mod(rhs)
    }
}

impl<C: Curve> std::ops::SubAssign for FieldElement<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<C: Curve> std::ops::Neg for FieldElement<C> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.neg_mod()
    }
}

impl<C: Curve> std::ops::Mul for FieldElement<C> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_mod(&rhs)
    }
}

impl<'a, 'b, C: Curve> std::ops::Mul<&'b FieldElement<C>> for &'a FieldElement<C> {
    type Output = FieldElement<C>;
    fn mul(self, rhs: &FieldElement<C>) -> Self::Output {
        self.mul_mod(rhs)
    }
}

impl<C: Curve> std::ops::MulAssign for FieldElement<C> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<C: Curve> std::ops::MulAssign<&FieldElement<C>> for FieldElement<C> {
    fn mul_assign(&mut self, rhs: &Self) {
        *self = &*self * rhs;
    }
}
