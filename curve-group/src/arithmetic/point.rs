use super::field::FieldElement;
use super::modular::{to_biguint, Modular};
use super::scalar::Scalar;
use crate::WeierstrassCurve;

use bigint::{Encoding, U256};

use std::fmt;
use std::marker::PhantomData;

/// Short Weierstrass point in projective coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Point<C: WeierstrassCurve> {
    x: FieldElement<C>,
    y: FieldElement<C>,
    z: FieldElement<C>,
}

impl<C: WeierstrassCurve> fmt::Display for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.affine_coordinates() {
            Some((x, y)) => write!(f, "({},{})", to_biguint(x.inner()), to_biguint(y.inner())),
            None => write!(f, "(0,0)"),
        }
    }
}

impl<C: WeierstrassCurve> PartialEq for Point<C> {
    fn eq(&self, other: &Self) -> bool {
        let x0z1 = self.x * other.z;
        let x1z0 = other.x * self.z;
        let y0z1 = self.y * other.z;
        let y1z0 = other.y * self.z;

        x0z1 == x1z0 && y0z1 == y1z0
    }
}

impl<C: WeierstrassCurve> Eq for Point<C> {}

impl<C: WeierstrassCurve> std::ops::Neg for Point<C> {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<C: WeierstrassCurve> std::ops::Neg for &Point<C> {
    type Output = Point<C>;
    fn neg(self) -> Self::Output {
        -*self
    }
}

impl<C: WeierstrassCurve> std::ops::Add for Point<C> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.geometric_add(&rhs)
    }
}

impl<'a, 'b, C: WeierstrassCurve> std::ops::Add<&'b Point<C>> for &'a Point<C> {
    type Output = Point<C>;
    fn add(self, rhs: &'b Point<C>) -> Self::Output {
        self.geometric_add(rhs)
    }
}

impl<C: WeierstrassCurve> std::ops::AddAssign<&Point<C>> for Point<C> {
    fn add_assign(&mut self, rhs: &Self) {
        *self = &*self + rhs
    }
}

impl<C: WeierstrassCurve> std::ops::Sub for Point<C> {
    type Output = Point<C>;
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<'a, 'b, C: WeierstrassCurve> std::ops::Sub<&'b Point<C>> for &'a Point<C> {
    type Output = Point<C>;
    fn sub(self, rhs: &'b Point<C>) -> Self::Output {
        self + &(-rhs)
    }
}

impl<'a, 'b, C: WeierstrassCurve> std::ops::Mul<&'b Scalar<C>> for &'a Point<C> {
    type Output = Point<C>;
    fn mul(self, rhs: &'b Scalar<C>) -> Self::Output {
        self.scalar_mul(rhs)
    }
}

impl<C: WeierstrassCurve> Point<C> {
    pub const GENERATOR: Self = Self {
        x: FieldElement(C::GENERATOR_X, PhantomData),
        y: FieldElement(C::GENERATOR_Y, PhantomData),
        z: FieldElement::ONE,
    };

    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    pub fn new(x: FieldElement<C>, y: FieldElement<C>, z: FieldElement<C>) -> Self {
        Self { x, y, z }
    }

    /// Affine point, `None` if it does not satisfy the curve equation.
    pub fn from_affine(x: FieldElement<C>, y: FieldElement<C>) -> Option<Self> {
        let point = Self::new(x, y, FieldElement::ONE);
        if point.is_on_curve() {
            Some(point)
        } else {
            None
        }
    }

    /// Lifts an x-coordinate onto the curve, `None` if `x^3 + ax + b` is not
    /// a square.
    pub fn from_x(x: FieldElement<C>) -> Option<Self> {
        let a = FieldElement::new(C::COEFF_A);
        let b = FieldElement::new(C::COEFF_B);
        let rhs = x * x * x + a * x + b;
        rhs.sqrt().map(|y| Self::new(x, y, FieldElement::ONE))
    }

    pub fn is_on_curve(&self) -> bool {
        let a = FieldElement::new(C::COEFF_A);
        let b = FieldElement::new(C::COEFF_B);

        let y2 = self.y * self.y;
        let y2z = y2 * self.z;
        let x3 = self.x * self.x * self.x;
        let ax = a * self.x;
        let z2 = self.z * self.z;
        let axz2 = ax * z2;
        let z3 = z2 * self.z;
        let bz3 = b * z3;
        let t5 = y2z - (x3 + axz2 + bz3);

        t5.is_zero()
    }

    pub fn double(&self) -> Self {
        self + self
    }

    /// Complete addition for arbitrary `a` (Renes-Costello-Batina, algorithm 1).
    pub fn geometric_add(&self, rhs: &Self) -> Self {
        let b3 = FieldElement::new(C::COEFF_B3);
        let a = FieldElement::new(C::COEFF_A);

        let mut t0 = self.x * rhs.x;
        let mut t1 = self.y * rhs.y;
        let mut t2 = self.z * rhs.z;
        let mut t3 = self.x + self.y;
        let mut t4 = rhs.x + rhs.y;

        t3 *= t4;
        t4 = t0 + t1;
        t3 -= t4;
        t4 = self.x + self.z;
        let mut t5 = rhs.x + rhs.z;

        t4 *= t5;
        t5 = t0 + t2;
        t4 -= t5;
        t5 = self.y + self.z;
        let mut sum_x = rhs.y + rhs.z;

        t5 *= sum_x;
        sum_x = t1 + t2;
        t5 -= sum_x;
        let mut sum_z = a * t4;
        sum_x = b3 * t2;

        sum_z += sum_x;
        sum_x = t1 - sum_z;
        sum_z += t1;
        let mut sum_y = sum_x * sum_z;
        t1 = t0 + t0;

        t1 += t0;
        t2 = a * t2;
        t4 *= b3;
        t1 += t2;
        t2 = t0 - t2;

        t2 *= a;
        t4 += t2;
        t0 = t1 * t4;
        sum_y += t0;
        t0 = t4 * t5;

        sum_x *= t3;
        sum_x -= t0;
        t0 = t1 * t3;
        sum_z *= t5;
        sum_z += t0;

        Self {
            x: sum_x,
            y: sum_y,
            z: sum_z,
        }
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

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn to_affine(&self) -> Self {
        match self.z.inverse() {
            Some(z_inv) => Self {
                x: self.x * z_inv,
                y: self.y * z_inv,
                z: FieldElement::ONE,
            },
            None => Self::IDENTITY,
        }
    }

    /// Normalized `(x, y)`, `None` for the identity.
    pub fn affine_coordinates(&self) -> Option<(FieldElement<C>, FieldElement<C>)> {
        self.z
            .inverse()
            .map(|z_inv| (self.x * z_inv, self.y * z_inv))
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
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Curve, Secp256k1, P256};

    type SecPoint = Point<Secp256k1>;
    type SecScalar = Scalar<Secp256k1>;
    type NistPoint = Point<P256>;
    type NistScalar = Scalar<P256>;

    fn sec_affine(x: &str, y: &str) -> SecPoint {
        SecPoint::from_affine(
            FieldElement::new(U256::from_be_hex(x)),
            FieldElement::new(U256::from_be_hex(y)),
        )
        .unwrap()
    }

    #[test]
    fn on_curve_check() {
        assert!(SecPoint::GENERATOR.is_on_curve());
        assert!(NistPoint::GENERATOR.is_on_curve());
        assert!(SecPoint::GENERATOR.double().is_on_curve());
        assert!(NistPoint::GENERATOR.double().is_on_curve());
        let sec_point = SecPoint::GENERATOR.scalar_mul(&SecScalar::new(U256::from_u32(123456)));
        assert!(sec_point.is_on_curve());
        let nist_point = NistPoint::GENERATOR.scalar_mul(&NistScalar::new(U256::from_u32(678910)));
        assert!(nist_point.is_on_curve());

        let nist_on_sec = SecPoint::new(
            FieldElement::new(P256::GENERATOR_X),
            FieldElement::new(P256::GENERATOR_Y),
            FieldElement::ONE,
        );
        assert!(!nist_on_sec.is_on_curve());
        assert!(SecPoint::from_affine(
            FieldElement::new(P256::GENERATOR_X),
            FieldElement::new(P256::GENERATOR_Y)
        )
        .is_none());
        assert!(SecPoint::IDENTITY.is_on_curve());
    }

    #[test]
    fn point_addition() {
        let g2 = SecPoint::GENERATOR.double();
        assert_eq!(
            g2.x().inner(),
            &U256::from_be_hex("f40af3b6c6fdf9aa5402b9fdc39ac4b67827eb373c92077452348e044f109fc8")
        );
        assert_eq!(
            g2.y().inner(),
            &U256::from_be_hex("56915849f52cc8f76f5fd7e4bf60db4a43bf633e1b1383f85fe89164bfadcbdb")
        );
        assert_eq!(
            g2.z().inner(),
            &U256::from_be_hex("f8783c53dfb2a307b568a6ad931fc97023dc71cdc3eac498b0c6ba5554759a29")
        );

        let p2 = sec_affine(
            "2e8d0966740a2e73be5bd5cc862e2898c716cf2fb8e23403ea602ee2b53044fc",
            "550a46dbf4baf1f43d7050414c89dfd3210086396d00e89c78ed63cc8ea95ed4",
        );
        let p3 = sec_affine(
            "ffa6f62fc1b273b62d531249afeaaab02401c8f1f0fbcd13a265cda2a62035d2",
            "587ae2c857b0eb7ae01db2c605b452ef297c99b7e2a20c7c282a40544838a7a0",
        );
        assert_eq!(SecPoint::GENERATOR + p2, p3);
        assert_eq!(p2 + SecPoint::GENERATOR, p3);
        assert_eq!(p3 - p2, SecPoint::GENERATOR);

        let four = SecScalar::new(U256::from_u8(4));
        let g4 = SecPoint::GENERATOR.scalar_mul(&four);
        assert_eq!(g2.double(), g4);
        assert_eq!(&g2 + &g2, g4);
    }

    #[test]
    fn identity_handling() {
        let g = SecPoint::GENERATOR;
        assert!(SecPoint::IDENTITY.is_identity());
        assert_eq!(g + SecPoint::IDENTITY, g);
        assert_eq!(SecPoint::IDENTITY + g, g);
        assert!((g - g).is_identity());
        assert!((g + (-g)).is_identity());
        assert_eq!(-SecPoint::IDENTITY, SecPoint::IDENTITY);
        assert_ne!(g, SecPoint::IDENTITY);
        assert!(g.mul_u256(&Secp256k1::ORDER).is_identity());
        assert!(NistPoint::GENERATOR.mul_u256(&P256::ORDER).is_identity());
        assert!(SecPoint::GENERATOR.mul_u256(&U256::ZERO).is_identity());
        assert_eq!(SecPoint::IDENTITY.affine_coordinates(), None);
        assert_eq!(SecPoint::IDENTITY.to_affine(), SecPoint::IDENTITY);
    }

    #[test]
    fn affine_point() {
        let g2 = SecPoint::GENERATOR.double().to_affine();
        assert_eq!(
            g2.x().inner(),
            &U256::from_be_hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5")
        );
        assert_eq!(
            g2.y().inner(),
            &U256::from_be_hex("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a")
        );
        assert_eq!(g2.z(), &FieldElement::ONE);

        let g3 = SecPoint::GENERATOR.scalar_mul(&SecScalar::new(U256::from_u8(3)));
        let (x, y) = g3.affine_coordinates().unwrap();
        assert_eq!(
            x.inner(),
            &U256::from_be_hex("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9")
        );
        assert_eq!(
            y.inner(),
            &U256::from_be_hex("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672")
        );
    }

    #[test]
    fn scalar_multiplication() {
        let p3 = sec_affine(
            "ffa6f62fc1b273b62d531249afeaaab02401c8f1f0fbcd13a265cda2a62035d2",
            "587ae2c857b0eb7ae01db2c605b452ef297c99b7e2a20c7c282a40544838a7a0",
        );
        let expected = sec_affine(
            "1bb679ca62055461269ddf7b1031ef65a46361b302abbb31c9ce1c0783f0b6d3",
            "6fce712829a2796890350110c40709434aaa7a7c1353596977aa4ad14428355a",
        );
        assert_eq!(&p3 * &SecScalar::new(U256::from_u32(0x050a)), expected);

        let mut g12 = SecPoint::IDENTITY;
        for _ in 0..12 {
            g12 = g12 + SecPoint::GENERATOR;
        }
        assert_eq!(
            SecPoint::GENERATOR.scalar_mul(&SecScalar::new(U256::from_u32(12))),
            g12
        );

        // (n - 1) G = -G
        let minus_one = -SecScalar::ONE;
        assert_eq!(SecPoint::GENERATOR.scalar_mul(&minus_one), -SecPoint::GENERATOR);
    }

    #[test]
    fn lift_x() {
        let x = FieldElement::<Secp256k1>::new(Secp256k1::GENERATOR_X);
        let lifted = SecPoint::from_x(x).unwrap();
        assert!(lifted == SecPoint::GENERATOR || lifted == -SecPoint::GENERATOR);
        // x^3 + 7 = 7 is not a square modulo the secp256k1 prime
        assert!(SecPoint::from_x(FieldElement::ZERO).is_none());
    }

    #[test]
    fn display() {
        assert_eq!(SecPoint::IDENTITY.to_string(), "(0,0)");
        assert_eq!(
            SecPoint::GENERATOR.double().to_string(),
            "(89565891926547004231252920425935692360644145829622209833684329913297188986597,\
             12158399299693830322967808612713398636155367887041628176798871954788371653930)"
        );
    }
}
