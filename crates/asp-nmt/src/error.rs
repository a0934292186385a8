//! Errors raised by the namespace Merkle tree.

use thiserror::Error;

/// Errors that can occur when building or proving over the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NmtError {
    /// No compression function is registered under the requested name.
    #[error("No hash function registered under name '{0}'")]
    MissingHashFunction(String),

    /// A record is shorter than its namespace plus the element hash.
    #[error("Invalid leaf length: got {got}, want >= {want}")]
    InvalidLeafLength {
        /// Encoded length received.
        got: usize,
        /// Minimum encoded length.
        want: usize,
    },

    /// The namespace list is not strictly ascending.
    #[error("Namespace at index {index} is not strictly below its successor")]
    InvalidOrder {
        /// Index of the first namespace of the offending pair.
        index: usize,
    },

    /// A namespace identifier does not have the tree's namespace width.
    #[error("Invalid namespace: got {got} bytes, want {want}")]
    InvalidNamespace {
        /// Width received.
        got: usize,
        /// Width of the tree's namespaces.
        want: usize,
    },

    /// A proof window lies outside the leaf layer.
    #[error("Invalid range [{start}, {end}) for a layer of {width} nodes")]
    InvalidRange {
        /// Window start (inclusive).
        start: usize,
        /// Window end (exclusive).
        end: usize,
        /// Width of the layer.
        width: usize,
    },

    /// A requested level does not exist in the layer stack.
    #[error("Invalid level {level} for a stack of depth {depth}")]
    InvalidLevel {
        /// Requested level.
        level: usize,
        /// Number of layers in the stack.
        depth: usize,
    },

    /// The leaves around a proven range contradict the claimed proof kind.
    #[error("Failed completeness check: {0}")]
    FailedCompletenessCheck(&'static str),

    /// A tree was requested over no leaves.
    #[error("Cannot build a tree over an empty leaf layer")]
    EmptyLayer,

    /// A proof's path layers do not have a verifiable shape.
    #[error("Malformed proof: {0}")]
    MalformedProof(&'static str),

    /// The root could not be computed for a non-empty tree.
    ///
    /// The tree itself is malformed; this is not retryable.
    #[error("Failed to calculate root: {0}")]
    RootUnavailable(&'static str),

    /// The leaf layer is not namespace sorted.
    ///
    /// The tree itself is malformed; this is not retryable.
    #[error("Inconsistent leaf layer: {0}")]
    InconsistentLeafLayer(String),

    /// An event could not be hashed into a record.
    #[error("Failed to hash event: {0}")]
    EventHash(String),
}
