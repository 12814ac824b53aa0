use super::field::FieldElement;
use super::modular::{to_biguint, u256_from_be_padded, Modular};
use super::scalar::Scalar;
use crate::EdwardsCurve;

use bigint::{Encoding, U256};

use std::fmt;

/// Twisted Edwards point in extended coordinates, `x = X/Z`, `y = Y/Z`,
/// `x * y = T/Z`.
#[derive(Debug, Clone, Copy)]
pub struct EdwardsPoint<C: EdwardsCurve> {
    x: FieldElement<C>,
    y: FieldElement<C>,
    z: FieldElement<C>,
    t: FieldElement<C>,
}

impl<C: EdwardsCurve> fmt::Display for EdwardsPoint<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (x, y) = self.affine_coordinates();
        write!(f, "({},{})", to_biguint(x.inner()), to_biguint(y.inner()))
    }
}

impl<C: EdwardsCurve> PartialEq for EdwardsPoint<C> {
    fn eq(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl<C: EdwardsCurve> Eq for EdwardsPoint<C> {}

impl<C: EdwardsCurve> std::ops::Neg for EdwardsPoint<C> {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }
}

impl<C: EdwardsCurve> std::ops::Add for EdwardsPoint<C> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.geometric_add(&rhs)
    }
}

impl<'a, 'b, C: EdwardsCurve> std::ops::Add<&'b EdwardsPoint<C>> for &'a EdwardsPoint<C> {
    type Output = EdwardsPoint<C>;
    fn add(self, rhs: &'b EdwardsPoint<C>) -> Self::Output {
        self.geometric_add(rhs)
    }
}

impl<C: EdwardsCurve> std::ops::AddAssign<&EdwardsPoint<C>> for EdwardsPoint<C> {
    fn add_assign(&mut self, rhs: &Self) {
        *self = &*self + rhs
    }
}

impl<C: EdwardsCurve> std::ops::Sub for EdwardsPoint<C> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<'a, 'b, C: EdwardsCurve> std::ops::Mul<&'b Scalar<C>> for &'a EdwardsPoint<C> {
    type Output = EdwardsPoint<C>;
    fn mul(self, rhs: &'b Scalar<C>) -> Self::Output {
        self.scalar_mul(rhs)
    }
}

impl<C: EdwardsCurve> EdwardsPoint<C> {
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    pub fn generator() -> Self {
        Self::from_affine_unchecked(
            FieldElement::new(C::GENERATOR_X),
            FieldElement::new(C::GENERATOR_Y),
        )
    }

    fn from_affine_unchecked(x: FieldElement<C>, y: FieldElement<C>) -> Self {
        Self {
            x,
            y,
            z: FieldElement::ONE,
            t: x * y,
        }
    }

    /// Affine point, `None` if it does not satisfy the curve equation.
    pub fn from_affine(x: FieldElement<C>, y: FieldElement<C>) -> Option<Self> {
        let point = Self::from_affine_unchecked(x, y);
        if point.is_on_curve() {
            Some(point)
        } else {
            None
        }
    }

    pub fn is_on_curve(&self) -> bool {
        let a = FieldElement::new(C::COEFF_A);
        let d = FieldElement::new(C::COEFF_D);

        let x2 = self.x * self.x;
        let y2 = self.y * self.y;
        let z2 = self.z * self.z;
        let lhs = (a * x2 + y2) * z2;
        let rhs = z2 * z2 + d * x2 * y2;

        !self.z.is_zero() && lhs == rhs && self.x * self.y == self.z * self.t
    }

    /// Unified addition (Hisil-Wong-Carter-Dawson 2008), complete when `a`
    /// is a square and `d` is not.
    pub fn geometric_add(&self, rhs: &Self) -> Self {
        let a = FieldElement::new(C::COEFF_A);
        let d = FieldElement::new(C::COEFF_D);

        let aa = self.x * rhs.x;
        let bb = self.y * rhs.y;
        let cc = self.t * d * rhs.t;
        let dd = self.z * rhs.z;
        let ee = (self.x + self.y) * (rhs.x + rhs.y) - aa - bb;
        let ff = dd - cc;
        let gg = dd + cc;
        let hh = bb - a * aa;

        Self {
            x: ee * ff,
            y: gg * hh,
            z: ff * gg,
            t: ee * hh,
        }
    }

    pub fn double(&self) -> Self {
        self + self
    }

    pub fn scalar_mul(&self, scalar: &Scalar<C>) -> Self {
        self.mul_u256(scalar.inner())
    }

    /// Fixed 4-bit window multiplication by an unreduced integer.
    pub fn mul_u256(&self, number: &U256) -> Self {
        let mut lookup = [Self::IDENTITY; 16];
        let mut current = Self::IDENTITY;
        for entry in lookup.iter_mut() {
            *entry = current;
            current += self;
        }

        let mut q = Self::IDENTITY;
        for byte in number.to_be_bytes() {
            for digit in [byte >> 4, byte & 0x0f] {
                q = q.double();
                q = q.double();
                q = q.double();
                q = q.double();
                q += &lookup[digit as usize];
            }
        }
        q
    }

    /// Multiplies by the cofactor, clearing any small-order component.
    pub fn mul_by_cofactor(&self) -> Self {
        self.mul_u256(&U256::from_u8(C::COFACTOR))
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }

    /// Whether the point lies in the prime-order subgroup.
    pub fn is_torsion_free(&self) -> bool {
        self.mul_u256(&C::ORDER).is_identity()
    }

    pub fn affine_coordinates(&self) -> (FieldElement<C>, FieldElement<C>) {
        match self.z.inverse() {
            Some(z_inv) => (self.x * z_inv, self.y * z_inv),
            None => (FieldElement::ZERO, FieldElement::ONE),
        }
    }

    /// Little-endian `y` with the parity of `x` in the top bit.
    pub fn compress(&self) -> Vec<u8> {
        let len = C::coord_len();
        let (x, y) = self.affine_coordinates();
        let mut bytes = y.inner().to_le_bytes()[..len].to_vec();
        if x.is_odd() {
            bytes[len - 1] |= 0x80;
        }
        bytes
    }

    /// Inverse of [`EdwardsPoint::compress`], `None` if the bytes encode no
    /// curve point. The input length is checked by the caller.
    pub fn decompress(bytes: &[u8]) -> Option<Self> {
        let mut be_bytes = bytes.to_vec();
        be_bytes.reverse();
        let sign = be_bytes[0] >> 7 == 1;
        be_bytes[0] &= 0x7f;

        let y = FieldElement::<C>::from_canonical(u256_from_be_padded(&be_bytes))?;
        let a = FieldElement::new(C::COEFF_A);
        let d = FieldElement::new(C::COEFF_D);

        // x^2 = (y^2 - 1) / (d * y^2 - a)
        let y2 = y * y;
        let numerator = y2 - FieldElement::ONE;
        let denominator = d * y2 - a;
        let mut x = (numerator * denominator.inverse()?).sqrt()?;

        if x.is_zero() && sign {
            return None;
        }
        if x.is_odd() != sign {
            x = -x;
        }
        Some(Self::from_affine_unchecked(x, y))
    }

    pub fn x(&self) -> &FieldElement<C> {
        &self.x
    }

    pub fn y(&self) -> &FieldElement<C> {
        &self.y
    }

    pub fn z(&self) -> &FieldElement<C> {
        &self.z
    }

    pub fn t(&self) -> &FieldElement<C> {
        &self.t
    }
}
