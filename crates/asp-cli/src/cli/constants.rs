//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Common
pub const ASP_EVENTS_FILE: &str = "ASP_EVENTS_FILE";
pub const ASP_CONFIG_FILE: &str = "ASP_CONFIG_FILE";
pub const ASP_HASH_FUNCTION: &str = "ASP_HASH_FUNCTION";

// Root
pub const ASP_ROOT_OUT: &str = "ASP_ROOT_OUT";

// Prove
pub const ASP_NAMESPACE: &str = "ASP_NAMESPACE";
pub const ASP_PROOF_OUT: &str = "ASP_PROOF_OUT";

// Config
pub const ASP_CONFIG_OUT: &str = "ASP_CONFIG_OUT";

// -------------------------
// Default values
// -------------------------

pub const DEFAULT_EVENTS_FILE: &str = "events.json";
pub const DEFAULT_CONFIG_FILE: &str = "tree_config.json";
