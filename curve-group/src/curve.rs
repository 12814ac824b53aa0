use crate::arithmetic::bit_length;
use crate::U256;
use serde::{Deserialize, Serialize};

/// Domain parameters shared by every curve family.
///
/// Implementors are zero-sized markers, so the parameters are immutable and
/// shared read-only by every scalar and point carrying the marker type.
pub trait Curve: Clone + Copy + std::fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    const NAME: &'static str;
    const PRIME_MODULUS: U256;
    const ORDER: U256;
    const COFACTOR: u8;
    const BIT_SIZE: usize;
    const GENERATOR_X: U256;
    const GENERATOR_Y: U256;

    /// Byte length of an encoded field element.
    fn coord_len() -> usize {
        (Self::BIT_SIZE + 7) >> 3
    }

    /// Byte length of an encoded scalar.
    fn scalar_len() -> usize {
        (bit_length(&Self::ORDER) + 7) >> 3
    }
}

/// `y^2 = x^3 + a*x + b`
pub trait WeierstrassCurve: Curve {
    const COEFF_A: U256;
    const COEFF_B: U256;
    /// `3 * b mod p`, used by every point addition.
    const COEFF_B3: U256;
}

/// `a*x^2 + y^2 = 1 + d*x^2*y^2`
pub trait EdwardsCurve: Curve {
    const COEFF_A: U256;
    const COEFF_D: U256;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secp256k1;

impl Curve for Secp256k1 {
    const NAME: &'static str = "secp256k1";
    const PRIME_MODULUS: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
    const ORDER: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
    const COFACTOR: u8 = 1;
    const BIT_SIZE: usize = 256;
    const GENERATOR_X: U256 =
        U256::from_be_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    const GENERATOR_Y: U256 =
        U256::from_be_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");
}

impl WeierstrassCurve for Secp256k1 {
    const COEFF_A: U256 = U256::ZERO;
    const COEFF_B: U256 = U256::from_u8(7);
    const COEFF_B3: U256 = U256::from_u8(21);
}

/// NIST P-256
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct P256;

impl Curve for P256 {
    const NAME: &'static str = "P-256";
    const PRIME_MODULUS: U256 =
        U256::from_be_hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");
    const ORDER: U256 =
        U256::from_be_hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
    const COFACTOR: u8 = 1;
    const BIT_SIZE: usize = 256;
    const GENERATOR_X: U256 =
        U256::from_be_hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");
    const GENERATOR_Y: U256 =
        U256::from_be_hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");
}

impl WeierstrassCurve for P256 {
    // -3 mod p
    const COEFF_A: U256 =
        U256::from_be_hex("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc");
    const COEFF_B: U256 =
        U256::from_be_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");
    const COEFF_B3: U256 =
        U256::from_be_hex("1052a18afeafbbb61bc3380063c994352f57141164fb12e2b36ab4ba777720e2");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edwards25519;

impl Curve for Edwards25519 {
    const NAME: &'static str = "edwards25519";
    const PRIME_MODULUS: U256 =
        U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");
    const ORDER: U256 =
        U256::from_be_hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed");
    const COFACTOR: u8 = 8;
    const BIT_SIZE: usize = 255;
    const GENERATOR_X: U256 =
        U256::from_be_hex("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a");
    const GENERATOR_Y: U256 =
        U256::from_be_hex("6666666666666666666666666666666666666666666666666666666666666658");
}

impl EdwardsCurve for Edwards25519 {
    // -1 mod p
    const COEFF_A: U256 =
        U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffec");
    // -121665/121666 mod p
    const COEFF_D: U256 =
        U256::from_be_hex("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3");
}
