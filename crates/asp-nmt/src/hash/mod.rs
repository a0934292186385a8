//! 2-to-1 compression functions used to build internal nodes.
//!
//! Every function maps two 32-byte elements to one. Field-based functions
//! read operands as big-endian integers reduced modulo the BN254 scalar field
//! and return the canonical 32-byte big-endian encoding of the result.

mod field;
mod mimc7;
mod poseidon;
mod poseidon2;
mod sha256;

use asp_core::base::Element;
use asp_core::schema::config::HashFunctionName;

use crate::NmtError;

pub use mimc7::Mimc7;
pub use poseidon::{Poseidon, poseidon_bytes};
pub use poseidon2::Poseidon2;
pub use sha256::Sha256Hex;

/// A deterministic 2-to-1 compression function.
pub trait HashFunction {
    /// Compress `left` and `right` into a single element.
    fn hash(&self, left: &Element, right: &Element) -> Element;
}

impl<T: HashFunction + ?Sized> HashFunction for &T {
    fn hash(&self, left: &Element, right: &Element) -> Element {
        (**self).hash(left, right)
    }
}

impl HashFunction for HashFunctionName {
    fn hash(&self, left: &Element, right: &Element) -> Element {
        match self {
            Self::Sha256 => Sha256Hex.hash(left, right),
            Self::Poseidon => Poseidon.hash(left, right),
            Self::Poseidon2 => Poseidon2.hash(left, right),
            Self::Mimc7 => Mimc7.hash(left, right),
        }
    }
}

/// Look up a registered compression function by name.
///
/// # Errors
/// Returns [`NmtError::MissingHashFunction`] for an unknown name.
pub fn hash_function(name: &str) -> Result<HashFunctionName, NmtError> {
    HashFunctionName::from_str_name(name)
        .ok_or_else(|| NmtError::MissingHashFunction(name.to_owned()))
}
