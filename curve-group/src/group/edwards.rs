use super::GroupPoint;
use crate::arithmetic::{EdwardsPoint, Scalar};
use crate::random::MAX_ATTEMPTS;
use crate::{EdwardsCurve, Error};

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<C: EdwardsCurve> GroupPoint for EdwardsPoint<C> {
    type Scalar = Scalar<C>;

    fn null(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    fn base(&mut self) -> &mut Self {
        *self = Self::generator();
        self
    }

    fn set(&mut self, other: &Self) -> &mut Self {
        *self = *other;
        self
    }

    fn equal(&self, other: &Self) -> bool {
        self == other
    }

    fn add(&mut self, a: &Self, b: &Self) -> &mut Self {
        *self = a + b;
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

    fn mul(&mut self, scalar: &Scalar<C>, point: Option<&Self>) -> &mut Self {
        *self = match point {
            Some(point) => point.scalar_mul(scalar),
            None => Self::generator().scalar_mul(scalar),
        };
        self
    }

    fn pick<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<&mut Self, Error> {
        let mut bytes = vec![0u8; C::coord_len()];
        for attempt in 0..MAX_ATTEMPTS {
            rng.fill_bytes(&mut bytes);
            let point = Self::decompress(&bytes).map(|point| point.mul_by_cofactor());
            match point {
                Some(point) if !point.is_identity() => {
                    *self = point;
                    return Ok(self);
                }
                _ => tracing::trace!(attempt, "rejected point candidate"),
            }
        }
        tracing::warn!(curve = C::NAME, "point picking exhausted");
        Err(Error::RandomnessExhausted(MAX_ATTEMPTS))
    }

    fn marshal_size(&self) -> usize {
        C::coord_len()
    }

    fn marshal_binary(&self) -> Vec<u8> {
        self.compress()
    }

    fn unmarshal_binary(&mut self, bytes: &[u8]) -> Result<&mut Self, Error> {
        if bytes.len() != self.marshal_size() {
            tracing::debug!(curve = C::NAME, len = bytes.len(), "rejected point encoding");
            return Err(Error::InvalidLength {
                expected: self.marshal_size(),
                actual: bytes.len(),
            });
        }
        *self = Self::decompress(bytes).ok_or_else(|| {
            tracing::debug!(curve = C::NAME, "decoded point is not on the curve");
            Error::NotOnCurve
        })?;
        Ok(self)
    }

    /// One byte short of the Weierstrass `coord_len - 2`. The top byte of the
    /// encoding carries the x sign bit and, for edwards25519, only 7 bits of
    /// y, so it stays padding along with one more byte of slack.
    fn embed_len(&self) -> usize {
        (C::BIT_SIZE - 16) / 8
    }

    fn embed<R: RngCore + CryptoRng>(
        &mut self,
        data: &[u8],
        rng: &mut R,
    ) -> Result<&mut Self, Error> {
        let max = self.embed_len();
        if data.len() > max {
            return Err(Error::PayloadTooLong {
                len: data.len(),
                max,
            });
        }

        // [len][data][padding], little-endian encoding of y
        let mut bytes = vec![0u8; C::coord_len()];
        bytes[0] = data.len() as u8;
        bytes[1..=data.len()].copy_from_slice(data);

        for attempt in 0..MAX_ATTEMPTS {
            rng.fill_bytes(&mut bytes[data.len() + 1..]);
            match Self::decompress(&bytes) {
                Some(point) if point.is_torsion_free() => {
                    *self = point;
                    return Ok(self);
                }
                _ => tracing::trace!(attempt, "embedding candidate rejected"),
            }
        }
        tracing::warn!(curve = C::NAME, "data embedding exhausted");
        Err(Error::RandomnessExhausted(MAX_ATTEMPTS))
    }

    fn data(&self) -> Result<Vec<u8>, Error> {
        if self.is_identity() {
            return Ok(Vec::new());
        }
        let bytes = self.compress();
        let len = bytes[0] as usize;
        let max = self.embed_len();
        if len > max {
            return Err(Error::InvalidEmbeddedLength { len, max });
        }
        Ok(bytes[1..=len].to_vec())
    }
}

impl<C: EdwardsCurve> Serialize for EdwardsPoint<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serdect::slice::serialize_hex_lower_or_bin(&self.marshal_binary(), serializer)
    }
}

impl<'de, C: EdwardsCurve> Deserialize<'de> for EdwardsPoint<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        let mut point = Self::IDENTITY;
        point
            .unmarshal_binary(&bytes)
            .map_err(serde::de::Error::custom)?;
        Ok(point)
    }
}
