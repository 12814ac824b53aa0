mod edwards;
mod field;
mod modular;
mod point;
mod scalar;

pub use edwards::EdwardsPoint;
pub use field::FieldElement;
pub use modular::{
    bit_length, is_odd, mul_mod_u256, to_biguint, u256_from_be_padded, u256_to_be_trimmed,
    Modular,
};
pub use point::Point;
pub use scalar::Scalar;
