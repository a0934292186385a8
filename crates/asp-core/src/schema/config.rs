use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::base::{ELEMENT_SIZE, Element, NamespaceSize, PrefixedHex};

/// Hex encoding of the default padding value for the leaf level.
pub const MERKLE_ZERO_HEX: &str =
    "2fe54c60d3acabf3343a35b6eba15db4821b340f76e741e2249685ed4899af6c";

/// Default padding value for the leaf level.
pub const MERKLE_ZERO: [u8; ELEMENT_SIZE] =
    hex_literal::hex!("2fe54c60d3acabf3343a35b6eba15db4821b340f76e741e2249685ed4899af6c");

/// Namespace width used by privacy-pool event records.
pub const DEFAULT_NAMESPACE_SIZE: u8 = 32;

/// Name of a registered 2-to-1 compression function.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashFunctionName {
    /// SHA-256 over the hex encodings of both operands.
    Sha256,
    /// Circom-compatible Poseidon over BN254.
    Poseidon,
    /// Poseidon2 over BN254.
    #[default]
    Poseidon2,
    /// iden3 MiMC7 over BN254.
    Mimc7,
}

impl HashFunctionName {
    /// All registered names.
    pub const ALL: [Self; 4] = [Self::Sha256, Self::Poseidon, Self::Poseidon2, Self::Mimc7];

    /// Parse from CLI/config string.
    #[must_use]
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "sha256" => Some(Self::Sha256),
            "poseidon" => Some(Self::Poseidon),
            "poseidon2" => Some(Self::Poseidon2),
            "mimc7" => Some(Self::Mimc7),
            _ => None,
        }
    }

    /// Canonical string name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Poseidon => "poseidon",
            Self::Poseidon2 => "poseidon2",
            Self::Mimc7 => "mimc7",
        }
    }
}

/// Parameters fixed for the lifetime of one tree.
#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TreeConfig {
    /// Namespace identifier width in bytes.
    #[serde(default = "default_namespace_size")]
    pub namespace_size: u8,
    /// Compression function used for internal nodes.
    #[serde(default)]
    pub hash_function: HashFunctionName,
    /// Leaf-level padding value; higher levels use its cascaded hashes.
    #[serde_as(as = "PrefixedHex")]
    #[serde(default = "default_zero")]
    pub zero: [u8; ELEMENT_SIZE],
}

const fn default_namespace_size() -> u8 {
    DEFAULT_NAMESPACE_SIZE
}

const fn default_zero() -> [u8; ELEMENT_SIZE] {
    MERKLE_ZERO
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            namespace_size: DEFAULT_NAMESPACE_SIZE,
            hash_function: HashFunctionName::default(),
            zero: MERKLE_ZERO,
        }
    }
}

impl TreeConfig {
    /// Namespace width as a typed size.
    #[must_use]
    pub const fn namespace_size(&self) -> NamespaceSize {
        NamespaceSize::new(self.namespace_size)
    }

    /// Leaf-level zero value.
    #[must_use]
    pub const fn zero_element(&self) -> Element {
        Element::new(self.zero)
    }
}
