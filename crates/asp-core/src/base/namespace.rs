//! Namespace identifiers and their fixed per-tree width.

use std::fmt;

use super::element::ELEMENT_SIZE;

/// Number of bytes a namespace identifier uses in one tree. Valid values are in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NamespaceSize(u8);

impl NamespaceSize {
    /// The largest supported namespace size.
    pub const MAX: Self = Self(u8::MAX);

    /// Create a namespace size.
    #[must_use]
    pub const fn new(size: u8) -> Self {
        Self(size)
    }

    /// The size as its raw `u8` value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The size in bytes.
    #[must_use]
    pub fn bytes(self) -> usize {
        usize::from(self.0)
    }

    /// Minimum encoded record length: namespace followed by the element hash.
    #[must_use]
    pub fn record_header_len(self) -> usize {
        self.bytes().saturating_add(ELEMENT_SIZE)
    }

    /// Encoded node length: min namespace, max namespace and the element hash.
    #[must_use]
    pub fn node_len(self) -> usize {
        self.bytes().saturating_mul(2).saturating_add(ELEMENT_SIZE)
    }
}

impl From<u8> for NamespaceSize {
    fn from(size: u8) -> Self {
        Self(size)
    }
}

/// A namespace identifier.
///
/// Identifiers are ordered as unsigned big-endian integers, which for equal
/// lengths is plain lexicographic byte order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NamespaceId(Vec<u8>);

impl NamespaceId {
    /// Create an identifier from owned bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Create an identifier by copying `bytes`.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// The all-zero identifier of the given size, used by padding nodes.
    #[must_use]
    pub fn zero(size: NamespaceSize) -> Self {
        Self(vec![0_u8; size.bytes()])
    }

    /// Borrow the identifier bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Width of the identifier in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Whether the identifier has no bytes (a zero-size namespace).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every byte is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }

    /// `self < other`.
    #[must_use]
    pub fn less(&self, other: &Self) -> bool {
        self < other
    }

    /// `self == other`, exact byte match.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self == other
    }

    /// `self <= other`.
    #[must_use]
    pub fn less_or_equal(&self, other: &Self) -> bool {
        self <= other
    }

    /// Lowercase hex encoding without prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}

impl From<Vec<u8>> for NamespaceId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for NamespaceId {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for NamespaceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_big_endian() {
        let low = NamespaceId::from([0x00, 0xff]);
        let high = NamespaceId::from([0x01, 0x00]);

        assert!(low.less(&high));
        assert!(!high.less(&low));
        assert!(low.less_or_equal(&high));
        assert!(low.less_or_equal(&low.clone()));
        assert!(!low.equal(&high));
        assert!(high.equal(&NamespaceId::from([0x01, 0x00])));
    }

    #[test]
    fn zero_namespace_has_requested_width() {
        let zero = NamespaceId::zero(NamespaceSize::new(4));
        assert_eq!(zero.as_bytes(), &[0_u8; 4]);
        assert!(zero.is_zero());
        assert_eq!(zero.to_hex(), "00000000");
    }

    #[test]
    fn sizes_follow_layout() {
        let size = NamespaceSize::new(32);
        assert_eq!(size.record_header_len(), 64);
        assert_eq!(size.node_len(), 96);
        assert_eq!(NamespaceSize::MAX.node_len(), 542);
    }
}
