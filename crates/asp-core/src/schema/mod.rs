//! Serialized schema/data contracts.

/// Tree configuration schema types.
pub mod config;
/// Privacy-pool event schema types.
pub mod event;
