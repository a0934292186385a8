//! Tree nodes: a namespace range plus the element hash of the subtree.

use std::fmt;

use asp_core::base::{ELEMENT_SIZE, Element, NamespaceId, NamespaceSize};

use crate::NmtError;
use crate::hash::HashFunction;
use crate::record::Record;

/// Which child of a pair is a padding node, if any.
///
/// Padding nodes carry all-zero namespaces, so they are excluded from the
/// parent's namespace range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroSide {
    /// Both children hold real data.
    #[default]
    None,
    /// The left child is padding.
    Left,
    /// The right child is padding.
    Right,
}

/// A tree node.
///
/// Encoded as `min_ns ‖ max_ns ‖ hash`. For real leaves `min_ns == max_ns`.
/// Padding nodes have all-zero namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    min_ns: NamespaceId,
    max_ns: NamespaceId,
    hash: Element,
}

impl Node {
    /// Create a node from its parts.
    #[must_use]
    pub const fn new(min_ns: NamespaceId, max_ns: NamespaceId, hash: Element) -> Self {
        Self {
            min_ns,
            max_ns,
            hash,
        }
    }

    /// The padding node for a level whose zero value is `zero`.
    #[must_use]
    pub fn zero(size: NamespaceSize, zero: Element) -> Self {
        Self {
            min_ns: NamespaceId::zero(size),
            max_ns: NamespaceId::zero(size),
            hash: zero,
        }
    }

    /// The leaf node for a record: its namespace on both sides and its hash.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            min_ns: record.namespace().clone(),
            max_ns: record.namespace().clone(),
            hash: record.hash(),
        }
    }

    /// Combine two sibling nodes into their parent.
    ///
    /// The parent hash is `hasher(left.hash, right.hash)`. Its namespace range
    /// spans both children, except that a padding side contributes nothing:
    /// with [`ZeroSide::Right`] the parent copies the left range, with
    /// [`ZeroSide::Left`] it copies the right range.
    #[must_use]
    pub fn combine<H: HashFunction + ?Sized>(
        left: &Self,
        right: &Self,
        zero_side: ZeroSide,
        hasher: &H,
    ) -> Self {
        let hash = hasher.hash(&left.hash, &right.hash);
        let (min_ns, max_ns) = match zero_side {
            ZeroSide::None => (left.min_ns.clone(), right.max_ns.clone()),
            ZeroSide::Left => (right.min_ns.clone(), right.max_ns.clone()),
            ZeroSide::Right => (left.min_ns.clone(), left.max_ns.clone()),
        };
        Self {
            min_ns,
            max_ns,
            hash,
        }
    }

    /// Smallest namespace in the subtree.
    #[must_use]
    pub const fn min_ns(&self) -> &NamespaceId {
        &self.min_ns
    }

    /// Largest namespace in the subtree.
    #[must_use]
    pub const fn max_ns(&self) -> &NamespaceId {
        &self.max_ns
    }

    /// Element hash of the subtree.
    #[must_use]
    pub const fn hash(&self) -> Element {
        self.hash
    }

    /// Whether both namespaces are all zero, as on padding nodes.
    #[must_use]
    pub fn has_zero_namespace(&self) -> bool {
        self.min_ns.is_zero() && self.max_ns.is_zero()
    }

    /// Encode as `min_ns ‖ max_ns ‖ hash`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.min_ns
                .size()
                .saturating_add(self.max_ns.size())
                .saturating_add(ELEMENT_SIZE),
        );
        out.extend_from_slice(self.min_ns.as_bytes());
        out.extend_from_slice(self.max_ns.as_bytes());
        out.extend_from_slice(self.hash.as_bytes());
        out
    }

    /// Decode a node of namespace width `size`.
    ///
    /// # Errors
    /// Returns [`NmtError::InvalidLeafLength`] if `bytes` is not exactly
    /// [`NamespaceSize::node_len`] long.
    pub fn from_bytes(size: NamespaceSize, bytes: &[u8]) -> Result<Self, NmtError> {
        let want = size.node_len();
        let wrong_length = NmtError::InvalidLeafLength {
            got: bytes.len(),
            want,
        };
        if bytes.len() != want {
            return Err(wrong_length);
        }
        let (min_ns, rest) = bytes.split_at(size.bytes());
        let (max_ns, hash) = rest.split_at(size.bytes());
        let hash = Element::from_be_slice(hash).ok_or(wrong_length)?;

        Ok(Self {
            min_ns: NamespaceId::from_slice(min_ns),
            max_ns: NamespaceId::from_slice(max_ns),
            hash,
        })
    }

    /// Lowercase hex of the encoded node.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Min: {} Max: {} Hash: {}",
            self.min_ns, self.max_ns, self.hash
        )
    }
}
