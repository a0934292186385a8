//! Leaf input records.
//!
//! Encoded layout: `namespace (size bytes) ‖ hash (32 bytes) ‖ payload`.

use std::fmt;

use asp_core::base::{ELEMENT_SIZE, Element, NamespaceId, NamespaceSize};

use crate::NmtError;

/// A namespace-prefixed leaf input.
///
/// The hash is supplied by the producer (a domain commitment over the payload);
/// the tree folds it upward without recomputing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    namespace: NamespaceId,
    hash: Element,
    payload: Vec<u8>,
}

impl Record {
    /// Create a record from its parts.
    #[must_use]
    pub const fn new(namespace: NamespaceId, hash: Element, payload: Vec<u8>) -> Self {
        Self {
            namespace,
            hash,
            payload,
        }
    }

    /// Decode a record from its byte layout.
    ///
    /// # Errors
    /// Returns [`NmtError::InvalidLeafLength`] if `bytes` is shorter than the
    /// namespace plus the element hash.
    pub fn from_bytes(size: NamespaceSize, bytes: &[u8]) -> Result<Self, NmtError> {
        let want = size.record_header_len();
        if bytes.len() < want {
            return Err(NmtError::InvalidLeafLength {
                got: bytes.len(),
                want,
            });
        }
        let (namespace, rest) = bytes.split_at(size.bytes());
        let (hash, payload) = rest.split_at(ELEMENT_SIZE);
        let hash = Element::from_be_slice(hash).ok_or(NmtError::InvalidLeafLength {
            got: bytes.len(),
            want,
        })?;

        Ok(Self {
            namespace: NamespaceId::from_slice(namespace),
            hash,
            payload: payload.to_vec(),
        })
    }

    /// Encode the record into its byte layout.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(self.namespace.as_bytes());
        out.extend_from_slice(self.hash.as_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Length of the encoded record.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.namespace
            .size()
            .saturating_add(ELEMENT_SIZE)
            .saturating_add(self.payload.len())
    }

    /// The namespace this record is attributed to.
    #[must_use]
    pub const fn namespace(&self) -> &NamespaceId {
        &self.namespace
    }

    /// The producer-supplied leaf hash.
    #[must_use]
    pub const fn hash(&self) -> Element {
        self.hash
    }

    /// Bytes following the header.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Lowercase hex of the encoded record.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NID: {} Hash: {}", self.namespace, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_header_and_payload() {
        let bytes = test_utils::record_bytes(&[9_u8; 4], [1_u8; 32], b"payload");
        let record = Record::from_bytes(NamespaceSize::new(4), &bytes).expect("valid record");

        assert_eq!(record.namespace().as_bytes(), &[9_u8; 4]);
        assert_eq!(record.hash(), Element::new([1_u8; 32]));
        assert_eq!(record.payload(), b"payload");
        assert_eq!(record.to_bytes(), bytes);
        assert_eq!(record.encoded_len(), bytes.len());
    }

    #[test]
    fn header_only_record_is_valid() {
        let bytes = test_utils::record_bytes(&[1_u8; 2], [2_u8; 32], &[]);
        let record = Record::from_bytes(NamespaceSize::new(2), &bytes).expect("header only");
        assert!(record.payload().is_empty());
    }

    #[test]
    fn short_record_is_rejected() {
        let result = Record::from_bytes(NamespaceSize::new(32), &[0_u8; 63]);
        assert_eq!(
            result,
            Err(NmtError::InvalidLeafLength { got: 63, want: 64 })
        );
    }
}
