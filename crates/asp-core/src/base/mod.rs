//! Foundational primitive types and byte/serde helpers.

mod element;
mod namespace;
mod utils;

pub use element::{ELEMENT_SIZE, Element};
pub use namespace::{NamespaceId, NamespaceSize};
pub use utils::{PrefixedHex, decode_prefixed_hex};
