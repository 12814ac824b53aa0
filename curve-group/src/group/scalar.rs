use super::GroupScalar;
use crate::arithmetic::{to_biguint, u256_from_be_padded, u256_to_be_trimmed, Modular, Scalar};
use crate::{random, Curve, Error};

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;

impl<C: Curve> GroupScalar for Scalar<C> {
    fn zero(&mut self) -> &mut Self {
        *self = Self::ZERO;
        self
    }

    fn one(&mut self) -> &mut Self {
        *self = Self::ONE;
        self
    }

    fn set(&mut self, other: &Self) -> &mut Self {
        *self = *other;
        self
    }

    fn add(&mut self, a: &Self, b: &Self) -> &mut Self {
        *self = *a + *b;
        self
    }

    fn sub(&mut self, a: &Self, b: &Self) -> &mut Self {
        *self = *a - *b;
        self
    }

    fn neg(&mut self, a: &Self) -> &mut Self {
        *self = -*a;
        self
    }

    fn mul(&mut self, a: &Self, b: &Self) -> &mut Self {
        *self = *a * *b;
        self
    }

    fn div(&mut self, a: &Self, b: &Self) -> Result<&mut Self, Error> {
        let b_inv = b.inverse().ok_or(Error::TriedToInvertZero)?;
        *self = *a * b_inv;
        Ok(self)
    }

    fn inv(&mut self, a: &Self) -> Result<&mut Self, Error> {
        *self = a.inverse().ok_or(Error::TriedToInvertZero)?;
        Ok(self)
    }

    fn equal(&self, other: &Self) -> bool {
        self == other
    }

    fn set_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        *self = Self::from_be_bytes_reduced(bytes);
        self
    }

    fn bytes(&self) -> Vec<u8> {
        to_biguint(self.inner()).to_bytes_be()
    }

    fn pick<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<&mut Self, Error> {
        let bytes = random::int(&to_biguint(&C::ORDER), rng)?;
        Ok(self.set_bytes(&bytes))
    }

    fn marshal_size(&self) -> usize {
        C::scalar_len()
    }

    fn marshal_binary(&self) -> Vec<u8> {
        u256_to_be_trimmed(self.inner(), C::scalar_len())
    }

    fn unmarshal_binary(&mut self, bytes: &[u8]) -> Result<&mut Self, Error> {
        if bytes.len() != C::scalar_len() {
            tracing::debug!(curve = C::NAME, len = bytes.len(), "rejected scalar encoding");
            return Err(Error::InvalidLength {
                expected: C::scalar_len(),
                actual: bytes.len(),
            });
        }
        *self = Self::from_canonical(u256_from_be_padded(bytes)).ok_or_else(|| {
            tracing::debug!(curve = C::NAME, "rejected unreduced scalar");
            Error::ScalarOutOfRange
        })?;
        Ok(self)
    }
}

impl<C: Curve> fmt::Display for Scalar<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.bytes()))
    }
}

impl<C: Curve> Serialize for Scalar<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serdect::slice::serialize_hex_lower_or_bin(&self.marshal_binary(), serializer)
    }
}

impl<'de, C: Curve> Deserialize<'de> for Scalar<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        let mut scalar = Self::ZERO;
        scalar
            .unmarshal_binary(&bytes)
            .map_err(serde::de::Error::custom)?;
        Ok(scalar)
    }
}
