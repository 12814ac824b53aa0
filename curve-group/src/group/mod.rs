//! Uniform scalar/point interface over every supported curve family.
//!
//! Operations write their result into the receiver and return it, so values
//! can be built by chaining on a fresh element:
//!
//! ```
//! use curve_group::{Group, GroupPoint, GroupScalar, Secp256k1, WeierstrassGroup};
//!
//! let group = WeierstrassGroup::<Secp256k1>::new().unwrap();
//! let mut three = group.scalar();
//! three.set_bytes(&[3]);
//! let mut point = group.point();
//! point.mul(&three, None);
//! assert_eq!(point.marshal_binary().len(), group.point_len());
//! ```

mod edwards;
mod scalar;
mod weierstrass;

use crate::arithmetic::{EdwardsPoint, FieldElement, Modular, Point, Scalar};
use crate::{Curve, EdwardsCurve, Error, WeierstrassCurve};

use rand_core::{CryptoRng, OsRng, RngCore};

use std::fmt;
use std::marker::PhantomData;

/// Integer modulo the group order.
pub trait GroupScalar: Clone + fmt::Debug + fmt::Display + PartialEq {
    fn zero(&mut self) -> &mut Self;
    fn one(&mut self) -> &mut Self;
    fn set(&mut self, other: &Self) -> &mut Self;
    fn add(&mut self, a: &Self, b: &Self) -> &mut Self;
    fn sub(&mut self, a: &Self, b: &Self) -> &mut Self;
    fn neg(&mut self, a: &Self) -> &mut Self;
    fn mul(&mut self, a: &Self, b: &Self) -> &mut Self;
    /// `a * b^-1`, fails if `b` is zero.
    fn div(&mut self, a: &Self, b: &Self) -> Result<&mut Self, Error>;
    fn inv(&mut self, a: &Self) -> Result<&mut Self, Error>;
    fn equal(&self, other: &Self) -> bool;
    /// Loads a big-endian integer of any length, reducing it modulo the order.
    fn set_bytes(&mut self, bytes: &[u8]) -> &mut Self;
    /// Shortest big-endian encoding of the value.
    fn bytes(&self) -> Vec<u8>;
    /// Uniform value in `[1, order)`.
    fn pick<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<&mut Self, Error>;

    fn pick_random(&mut self) -> Result<&mut Self, Error> {
        self.pick(&mut OsRng)
    }

    fn marshal_size(&self) -> usize;
    fn marshal_binary(&self) -> Vec<u8>;
    /// Strict inverse of [`GroupScalar::marshal_binary`], unreduced values
    /// are rejected.
    fn unmarshal_binary(&mut self, bytes: &[u8]) -> Result<&mut Self, Error>;
}

/// Element of the prime-order group generated by the curve's base point.
pub trait GroupPoint: Clone + fmt::Debug + fmt::Display + PartialEq {
    type Scalar: GroupScalar;

    fn null(&mut self) -> &mut Self;
    fn base(&mut self) -> &mut Self;
    fn set(&mut self, other: &Self) -> &mut Self;
    fn equal(&self, other: &Self) -> bool;
    fn add(&mut self, a: &Self, b: &Self) -> &mut Self;
    fn sub(&mut self, a: &Self, b: &Self) -> &mut Self;
    fn neg(&mut self, a: &Self) -> &mut Self;
    /// `scalar * point`, or `scalar * base` without a point.
    fn mul(&mut self, scalar: &Self::Scalar, point: Option<&Self>) -> &mut Self;
    fn pick<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<&mut Self, Error>;

    fn pick_random(&mut self) -> Result<&mut Self, Error> {
        self.pick(&mut OsRng)
    }

    fn marshal_size(&self) -> usize;
    fn marshal_binary(&self) -> Vec<u8>;
    fn unmarshal_binary(&mut self, bytes: &[u8]) -> Result<&mut Self, Error>;
    /// Maximum payload accepted by [`GroupPoint::embed`].
    fn embed_len(&self) -> usize;
    /// Encodes `data` into a valid point, drawing padding from `rng`.
    fn embed<R: RngCore + CryptoRng>(
        &mut self,
        data: &[u8],
        rng: &mut R,
    ) -> Result<&mut Self, Error>;

    fn embed_random(&mut self, data: &[u8]) -> Result<&mut Self, Error> {
        self.embed(data, &mut OsRng)
    }

    /// Payload written by [`GroupPoint::embed`].
    fn data(&self) -> Result<Vec<u8>, Error>;
}

/// Factory for zero scalars and identity points of one parameter set.
pub trait Group: fmt::Display {
    type Scalar: GroupScalar;
    type Point: GroupPoint<Scalar = Self::Scalar>;

    fn name(&self) -> &'static str;
    fn scalar_len(&self) -> usize;
    fn point_len(&self) -> usize;
    fn scalar(&self) -> Self::Scalar;
    fn point(&self) -> Self::Point;
}

fn check_common<C: Curve>() -> Result<(), Error> {
    if C::BIT_SIZE > 256 {
        return Err(Error::InvalidParameters("coordinates wider than 256 bits"));
    }
    if crate::arithmetic::bit_length(&C::PRIME_MODULUS) != C::BIT_SIZE {
        return Err(Error::InvalidParameters("bit size does not match the field prime"));
    }
    if C::scalar_len() == 0 || C::COFACTOR == 0 {
        return Err(Error::InvalidParameters("empty group order"));
    }
    if FieldElement::<C>::from_canonical(C::GENERATOR_X).is_none()
        || FieldElement::<C>::from_canonical(C::GENERATOR_Y).is_none()
    {
        return Err(Error::InvalidParameters("generator coordinates are not reduced"));
    }
    Ok(())
}

/// Short Weierstrass group, uncompressed `0x04 || x || y` point encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeierstrassGroup<C: WeierstrassCurve>(PhantomData<C>);

impl<C: WeierstrassCurve> WeierstrassGroup<C> {
    pub fn new() -> Result<Self, Error> {
        check_common::<C>()?;
        // the coordinate space must leave room for the length byte and a
        // byte of padding
        if C::coord_len() < 2 {
            return Err(Error::InvalidParameters("coordinates too short to embed data"));
        }
        let b = FieldElement::<C>::new(C::COEFF_B);
        if FieldElement::<C>::from_canonical(C::COEFF_B3) != Some(b + b + b) {
            return Err(Error::InvalidParameters("b3 is not 3 * b"));
        }
        let generator = Point::<C>::GENERATOR;
        if !generator.is_on_curve() {
            return Err(Error::InvalidParameters("generator is not on the curve"));
        }
        if !generator.mul_u256(&C::ORDER).is_identity() {
            return Err(Error::InvalidParameters("generator order mismatch"));
        }
        tracing::debug!(curve = C::NAME, "validated domain parameters");
        Ok(Self(PhantomData))
    }
}

impl<C: WeierstrassCurve> fmt::Display for WeierstrassGroup<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", C::NAME)
    }
}

impl<C: WeierstrassCurve> Group for WeierstrassGroup<C> {
    type Scalar = Scalar<C>;
    type Point = Point<C>;

    fn name(&self) -> &'static str {
        C::NAME
    }

    fn scalar_len(&self) -> usize {
        C::scalar_len()
    }

    fn point_len(&self) -> usize {
        self.point().marshal_size()
    }

    fn scalar(&self) -> Scalar<C> {
        Scalar::ZERO
    }

    fn point(&self) -> Point<C> {
        Point::IDENTITY
    }
}

/// Twisted Edwards group, compressed little-endian point encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdwardsGroup<C: EdwardsCurve>(PhantomData<C>);

impl<C: EdwardsCurve> EdwardsGroup<C> {
    pub fn new() -> Result<Self, Error> {
        check_common::<C>()?;
        if C::BIT_SIZE >= 8 * C::coord_len() {
            return Err(Error::InvalidParameters("no spare bit for the x sign"));
        }
        if C::BIT_SIZE < 24 {
            return Err(Error::InvalidParameters("coordinates too short to embed data"));
        }
        let generator = EdwardsPoint::<C>::generator();
        if !generator.is_on_curve() {
            return Err(Error::InvalidParameters("generator is not on the curve"));
        }
        if generator.is_identity() {
            return Err(Error::InvalidParameters("generator is the identity"));
        }
        if !generator.is_torsion_free() {
            return Err(Error::InvalidParameters("generator order mismatch"));
        }
        // the unified addition law is only complete for a square `a` and a
        // non-square `d`
        if !FieldElement::<C>::new(C::COEFF_A).is_square()
            || FieldElement::<C>::new(C::COEFF_D).is_square()
        {
            return Err(Error::InvalidParameters("incomplete addition law"));
        }
        tracing::debug!(curve = C::NAME, "validated domain parameters");
        Ok(Self(PhantomData))
    }
}

impl<C: EdwardsCurve> fmt::Display for EdwardsGroup<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", C::NAME)
    }
}

impl<C: EdwardsCurve> Group for EdwardsGroup<C> {
    type Scalar = Scalar<C>;
    type Point = EdwardsPoint<C>;

    fn name(&self) -> &'static str {
        C::NAME
    }

    fn scalar_len(&self) -> usize {
        C::scalar_len()
    }

    fn point_len(&self) -> usize {
        self.point().marshal_size()
    }

    fn scalar(&self) -> Scalar<C> {
        Scalar::ZERO
    }

    fn point(&self) -> EdwardsPoint<C> {
        EdwardsPoint::IDENTITY
    }
}
