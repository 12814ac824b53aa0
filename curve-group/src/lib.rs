//! Prime-order elliptic curve groups behind one scalar/point interface.
//!
//! Short Weierstrass curves ([`Secp256k1`], [`P256`]) and twisted Edwards
//! curves ([`Edwards25519`]) share the [`Group`], [`GroupScalar`] and
//! [`GroupPoint`] traits, including byte encodings, uniform sampling and
//! embedding of short payloads into points.
//!
//! NOTE the arithmetic is not constant time. Branches and loop counts depend
//! on scalar and coordinate values, so secret keys handled here may leak
//! through timing.
#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

pub mod arithmetic;
pub mod curve;
mod error;
pub mod group;
pub mod random;

pub use bigint::U256;
pub use curve::{Curve, Edwards25519, EdwardsCurve, Secp256k1, WeierstrassCurve, P256};
pub use error::{Error, ErrorKind};
pub use group::{EdwardsGroup, Group, GroupPoint, GroupScalar, WeierstrassGroup};
