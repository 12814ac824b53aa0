use super::GroupPoint;
use crate::arithmetic::{
    to_biguint, u256_from_be_padded, u256_to_be_trimmed, FieldElement, Modular, Point, Scalar,
};
use crate::random::{self, MAX_ATTEMPTS};
use crate::{Error, WeierstrassCurve};

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Leading byte of the uncompressed encoding.
const UNCOMPRESSED: u8 = 0x04;

impl<C: WeierstrassCurve> GroupPoint for Point<C> {
    type Scalar = Scalar<C>;

    fn null(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    fn base(&mut self) -> &mut Self {
        *self = Self::GENERATOR;
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
        *self = a - b;
        self
    }

    fn neg(&mut self, a: &Self) -> &mut Self {
        *self = -a;
        self
    }

    fn mul(&mut self, scalar: &Scalar<C>, point: Option<&Self>) -> &mut Self {
        *self = point.unwrap_or(&Self::GENERATOR).scalar_mul(scalar);
        self
    }

    fn pick<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<&mut Self, Error> {
        let modulus = to_biguint(&C::PRIME_MODULUS);
        for attempt in 0..MAX_ATTEMPTS {
            let x_bytes = random::int(&modulus, rng)?;
            let x = FieldElement::new(u256_from_be_padded(&x_bytes));
            if let Some(point) = Self::from_x(x) {
                *self = point;
                return Ok(self);
            }
            tracing::trace!(attempt, "x-coordinate is not on the curve");
        }
        tracing::warn!(curve = C::NAME, "point picking exhausted");
        Err(Error::RandomnessExhausted(MAX_ATTEMPTS))
    }

    fn marshal_size(&self) -> usize {
        1 + 2 * C::coord_len()
    }

    fn marshal_binary(&self) -> Vec<u8> {
        let coord_len = C::coord_len();
        let mut bytes = Vec::with_capacity(self.marshal_size());
        bytes.push(UNCOMPRESSED);
        match self.affine_coordinates() {
            Some((x, y)) => {
                bytes.extend_from_slice(&u256_to_be_trimmed(x.inner(), coord_len));
                bytes.extend_from_slice(&u256_to_be_trimmed(y.inner(), coord_len));
            }
            None => bytes.resize(self.marshal_size(), 0),
        }
        bytes
    }

    fn unmarshal_binary(&mut self, bytes: &[u8]) -> Result<&mut Self, Error> {
        let coord_len = C::coord_len();
        if bytes.len() != self.marshal_size() {
            tracing::debug!(curve = C::NAME, len = bytes.len(), "rejected point encoding");
            return Err(Error::InvalidLength {
                expected: self.marshal_size(),
                actual: bytes.len(),
            });
        }
        if bytes[0] != UNCOMPRESSED {
            tracing::debug!(curve = C::NAME, marker = bytes[0], "rejected point encoding");
            return Err(Error::UnknownFormat(bytes[0]));
        }

        let body = &bytes[1..];
        if body.iter().all(|byte| *byte == 0) {
            *self = Self::IDENTITY;
            return Ok(self);
        }

        let x = FieldElement::from_canonical(u256_from_be_padded(&body[..coord_len]));
        let y = FieldElement::from_canonical(u256_from_be_padded(&body[coord_len..]));
        let point = match (x, y) {
            (Some(x), Some(y)) => Self::from_affine(x, y),
            _ => None,
        };
        *self = point.ok_or_else(|| {
            tracing::debug!(curve = C::NAME, "decoded point is not on the curve");
            Error::NotOnCurve
        })?;
        Ok(self)
    }

    fn embed_len(&self) -> usize {
        C::coord_len() - 2
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

        // [padding][data][len], big-endian
        let coord_len = C::coord_len();
        let padding_len = coord_len - 1 - data.len();
        let mut x_bytes = vec![0u8; coord_len];
        x_bytes[padding_len..coord_len - 1].copy_from_slice(data);
        x_bytes[coord_len - 1] = data.len() as u8;

        let high_bits = C::BIT_SIZE & 7;
        for attempt in 0..MAX_ATTEMPTS {
            rng.fill_bytes(&mut x_bytes[..padding_len]);
            if high_bits != 0 {
                x_bytes[0] &= !(0xff << high_bits);
            }
            let candidate = FieldElement::from_canonical(u256_from_be_padded(&x_bytes));
            if let Some(point) = candidate.and_then(Self::from_x) {
                *self = point;
                return Ok(self);
            }
            tracing::trace!(attempt, "embedding candidate is not on the curve");
        }
        tracing::warn!(curve = C::NAME, "data embedding exhausted");
        Err(Error::RandomnessExhausted(MAX_ATTEMPTS))
    }

    fn data(&self) -> Result<Vec<u8>, Error> {
        let x = match self.affine_coordinates() {
            Some((x, _)) => x,
            None => return Ok(Vec::new()),
        };
        let coord_len = C::coord_len();
        let x_bytes = u256_to_be_trimmed(x.inner(), coord_len);
        let len = x_bytes[coord_len - 1] as usize;
        let max = self.embed_len();
        if len > max {
            return Err(Error::InvalidEmbeddedLength { len, max });
        }
        Ok(x_bytes[coord_len - 1 - len..coord_len - 1].to_vec())
    }
}

impl<C: WeierstrassCurve> Serialize for Point<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serdect::slice::serialize_hex_lower_or_bin(&self.marshal_binary(), serializer)
    }
}

impl<'de, C: WeierstrassCurve> Deserialize<'de> for Point<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        let mut point = Self::IDENTITY;
        point
            .unmarshal_binary(&bytes)
            .map_err(serde::de::Error::custom)?;
        Ok(point)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::group::GroupScalar;
    use crate::{ErrorKind, Secp256k1, P256, U256};
    use rand::rngs::StdRng;
    use rand_core::SeedableRng;

    type SecPoint = Point<Secp256k1>;
    type SecScalar = Scalar<Secp256k1>;

    const MARSHALLED: &str = "048da88793ee80f81662407f1dc82522e1f3d89698722063cd5a2c296eab7c4f43\
                              50d6711d681cfbe64d3ef610631b9655215f12916af812259acde908c7e6325e";

    fn sec_point(x: &str, y: &str) -> SecPoint {
        SecPoint::from_affine(
            FieldElement::new(U256::from_be_hex(x)),
            FieldElement::new(U256::from_be_hex(y)),
        )
        .unwrap()
    }

    #[test]
    fn marshalling() {
        let bytes = hex::decode(MARSHALLED).unwrap();
        let mut point = SecPoint::IDENTITY;
        assert_eq!(point.marshal_size(), 65);
        point.unmarshal_binary(&bytes).unwrap();
        assert_eq!(
            point,
            sec_point(
                "8da88793ee80f81662407f1dc82522e1f3d89698722063cd5a2c296eab7c4f43",
                "50d6711d681cfbe64d3ef610631b9655215f12916af812259acde908c7e6325e"
            )
        );
        assert_eq!(point.marshal_binary(), bytes);

        // projective inputs are normalized before encoding
        let doubled = SecPoint::GENERATOR.double();
        let mut decoded = SecPoint::IDENTITY;
        decoded.unmarshal_binary(&doubled.marshal_binary()).unwrap();
        assert_eq!(decoded, doubled);
    }

    #[test]
    fn identity_encoding() {
        let mut identity = SecPoint::GENERATOR;
        identity.null();
        let bytes = identity.marshal_binary();
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
        assert!(bytes[1..].iter().all(|byte| *byte == 0));

        let mut decoded = SecPoint::GENERATOR;
        decoded.unmarshal_binary(&bytes).unwrap();
        assert!(decoded.is_identity());
        assert_eq!(decoded.to_string(), "(0,0)");
    }

    #[test]
    fn malformed_encodings() {
        let bytes = hex::decode(MARSHALLED).unwrap();
        let mut point = SecPoint::IDENTITY;

        let err = point.unmarshal_binary(&bytes[..64]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(point.unmarshal_binary(&[]).is_err());

        let mut wrong_marker = bytes.clone();
        wrong_marker[0] = 0x02;
        assert_eq!(
            point.unmarshal_binary(&wrong_marker).unwrap_err(),
            Error::UnknownFormat(0x02)
        );

        let mut off_curve = bytes.clone();
        off_curve[64] ^= 1;
        assert_eq!(
            point.unmarshal_binary(&off_curve).unwrap_err(),
            Error::NotOnCurve
        );

        // x = p is not a canonical coordinate
        let mut unreduced = vec![0x04];
        unreduced.extend_from_slice(&hex::decode(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        )
        .unwrap());
        unreduced.extend_from_slice(&[1; 32]);
        assert_eq!(
            point.unmarshal_binary(&unreduced).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert!(point.is_identity());
    }

    #[test]
    fn group_law() {
        let p2 = sec_point(
            "2e8d0966740a2e73be5bd5cc862e2898c716cf2fb8e23403ea602ee2b53044fc",
            "550a46dbf4baf1f43d7050414c89dfd3210086396d00e89c78ed63cc8ea95ed4",
        );
        let p3 = sec_point(
            "ffa6f62fc1b273b62d531249afeaaab02401c8f1f0fbcd13a265cda2a62035d2",
            "587ae2c857b0eb7ae01db2c605b452ef297c99b7e2a20c7c282a40544838a7a0",
        );
        let mut base = SecPoint::IDENTITY;
        base.base();

        let mut sum = SecPoint::IDENTITY;
        assert!(sum.add(&base, &p2).equal(&p3));
        assert!(sum.add(&p2, &base).equal(&p3));

        let mut diff = SecPoint::IDENTITY;
        assert!(diff.sub(&p3, &p2).equal(&base));

        let mut neg = SecPoint::IDENTITY;
        neg.neg(&p3);
        assert_eq!(
            neg,
            sec_point(
                "ffa6f62fc1b273b62d531249afeaaab02401c8f1f0fbcd13a265cda2a62035d2",
                "a7851d37a84f14851fe24d39fa4bad10d68366481d5df383d7d5bfaab7c7548f",
            )
        );
        let mut null = SecPoint::IDENTITY;
        null.null();
        assert!(neg.neg(&null).equal(&null));

        let mut s = SecScalar::ZERO;
        s.set_bytes(&[5, 10]);
        let mut prod = SecPoint::IDENTITY;
        prod.mul(&s, Some(&p3));
        assert!(prod.is_on_curve());
        assert_eq!(
            prod,
            sec_point(
                "1bb679ca62055461269ddf7b1031ef65a46361b302abbb31c9ce1c0783f0b6d3",
                "6fce712829a2796890350110c40709434aaa7a7c1353596977aa4ad14428355a",
            )
        );

        let mut three = SecScalar::ZERO;
        three.set_bytes(&[3]);
        let mut three_base = SecPoint::IDENTITY;
        three_base.mul(&three, None);
        let mut target = SecPoint::IDENTITY;
        target.mul(&three, Some(&base));
        assert!(three_base.equal(&target));
        assert!(!three_base.equal(&base));
    }

    #[test]
    fn picking() {
        let mut rng = StdRng::seed_from_u64(42);
        let target = sec_point(
            "8da88793ee80f81662407f1dc82522e1f3d89698722063cd5a2c296eab7c4f43",
            "50d6711d681cfbe64d3ef610631b9655215f12916af812259acde908c7e6325e",
        );
        for _ in 0..10 {
            let mut point = SecPoint::IDENTITY;
            point.pick(&mut rng).unwrap();
            assert!(point.is_on_curve());
            assert!(!point.is_identity());
            assert!(!point.equal(&target));
        }

        let mut point = Point::<P256>::IDENTITY;
        point.pick_random().unwrap();
        assert!(point.is_on_curve());
    }

    #[test]
    fn embedding() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut point = SecPoint::IDENTITY;
        assert_eq!(point.embed_len(), 30);

        let data = [1, 2, 3, 4, 5, 6];
        point.embed(&data, &mut rng).unwrap();
        assert!(point.is_on_curve());
        assert_eq!(point.data().unwrap(), data.to_vec());

        let full: Vec<u8> = b"DEDISDEDISDEDISDEDISDEDISDEDIS".to_vec();
        point.embed(&full, &mut rng).unwrap();
        assert_eq!(point.data().unwrap(), full);

        point.embed(&[], &mut rng).unwrap();
        assert!(point.data().unwrap().is_empty());

        let too_long = vec![0u8; 31];
        let err = point.embed(&too_long, &mut rng).unwrap_err();
        assert_eq!(err, Error::PayloadTooLong { len: 31, max: 30 });
        assert_eq!(err.kind(), ErrorKind::Length);
    }

    #[test]
    fn data_layout() {
        // the payload sits right above the length byte of x
        let point = sec_point(
            "a332ffb5ae42529e21dd978b71148a68839450c7c9a0bd53d4df020406080a05",
            "5f2b1326bb4678d8558574b275718af16f2e73f040e4248a991f941ba8a12f99",
        );
        assert_eq!(point.data().unwrap(), vec![2, 4, 6, 8, 10]);

        let bogus = SecPoint::from_x(FieldElement::new(U256::from_be_hex(
            "c9d193be86db50a506e7997ef0ccafd4aa03009ce4dc0ebdd469fa541a05c389",
        )))
        .unwrap();
        assert_eq!(
            bogus.data().unwrap_err(),
            Error::InvalidEmbeddedLength { len: 0x89, max: 30 }
        );

        assert!(SecPoint::IDENTITY.data().unwrap().is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let point = SecPoint::GENERATOR.double();
        let json = serde_json::to_string(&point).unwrap();
        let decoded: SecPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, point);

        let json = serde_json::to_string(&SecPoint::IDENTITY).unwrap();
        assert_eq!(json, format!("\"04{}\"", "00".repeat(64)));
    }
}
