//! 32-byte hash/field value carried by every tree node.

use std::fmt;

/// Width in bytes of an [`Element`].
pub const ELEMENT_SIZE: usize = 32;

/// A fixed 32-byte value.
///
/// Elements are the hash payload of tree nodes. Field-arithmetic hash
/// functions read them as unsigned big-endian integers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Element([u8; ELEMENT_SIZE]);

impl Element {
    /// The all-zero element.
    pub const ZERO: Self = Self([0_u8; ELEMENT_SIZE]);

    /// Create an element from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ELEMENT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; ELEMENT_SIZE] {
        self.0
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ELEMENT_SIZE] {
        &self.0
    }

    /// Build an element from a big-endian integer encoding, left-padding with zeros.
    ///
    /// Returns `None` if `bytes` is longer than [`ELEMENT_SIZE`].
    #[must_use]
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        let pad = ELEMENT_SIZE.checked_sub(bytes.len())?;
        let mut out = [0_u8; ELEMENT_SIZE];
        out.get_mut(pad..)?.copy_from_slice(bytes);
        Some(Self(out))
    }

    /// Lowercase hex encoding without prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex string, with or without `0x` prefix.
    ///
    /// # Errors
    /// Returns an error if the string is not valid hex of exactly 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut out = [0_u8; ELEMENT_SIZE];
        hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut out)?;
        Ok(Self(out))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.to_hex())
    }
}

impl From<[u8; ELEMENT_SIZE]> for Element {
    fn from(bytes: [u8; ELEMENT_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Element> for [u8; ELEMENT_SIZE] {
    fn from(element: Element) -> Self {
        element.0
    }
}

impl AsRef<[u8]> for Element {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_be_slice_left_pads() {
        let element = Element::from_be_slice(&[0xab, 0xcd]).expect("short input fits");
        let mut expected = [0_u8; ELEMENT_SIZE];
        expected[30] = 0xab;
        expected[31] = 0xcd;
        assert_eq!(element.to_bytes(), expected);

        assert_eq!(Element::from_be_slice(&[]), Some(Element::ZERO));
        assert_eq!(Element::from_be_slice(&[1_u8; 33]), None);
    }

    #[test]
    fn hex_roundtrip_accepts_prefix() {
        let element = Element::new([7_u8; ELEMENT_SIZE]);
        let encoded = element.to_hex();
        assert_eq!(encoded.len(), 64);
        assert_eq!(Element::from_hex(&encoded), Ok(element));
        assert_eq!(Element::from_hex(&format!("0x{encoded}")), Ok(element));
        assert!(Element::from_hex("abcd").is_err());
    }
}
