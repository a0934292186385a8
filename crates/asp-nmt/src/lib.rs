//! Namespace Merkle tree with inclusion and absence range proofs.

mod error;
mod event;
mod group;
pub mod hash;
mod layer;
mod node;
mod proof;
mod record;

pub use error::NmtError;
pub use event::{
    EVENT_NAMESPACE_SIZE, EVENT_RECORD_SIZE, event_from_record, event_hash, event_record,
};
pub use group::{LeafLayer, NamespaceGroup, NamespaceGrouping};
pub use hash::{HashFunction, hash_function};
pub use layer::{
    Layer, LayerStack, build_layer, build_layer_stack, calc_root, layer_count, tree_depth,
};
pub use node::{Node, ZeroSide};
pub use proof::{Proof, ProofKind, build_range_proof, prove_namespace, verify_range_proof};
pub use record::Record;
