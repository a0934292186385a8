//! Command-line interface for the `asp` CLI application.

mod config;
pub mod constants;

use std::path::PathBuf;

use asp_core::base::{NamespaceId, decode_prefixed_hex};
use asp_core::schema::config::HashFunctionName;
use clap::Parser;
use eyre::{Result, ensure};

pub use self::config::ConfigCommands;
use self::constants::{
    ASP_CONFIG_FILE, ASP_EVENTS_FILE, ASP_HASH_FUNCTION, ASP_NAMESPACE, ASP_PROOF_OUT,
    ASP_ROOT_OUT, DEFAULT_EVENTS_FILE,
};

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "asp")]
#[command(about = "Namespace Merkle tree tools for privacy-pool events")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Build the tree over an events file and report its root.
    Root {
        /// Root arguments.
        #[command(flatten)]
        args: RootArgs,
    },
    /// Prove that a sender namespace is included in, or absent from, the tree.
    Prove {
        /// Prove arguments.
        #[command(flatten)]
        args: ProveArgs,
    },
    /// Tree configuration utilities.
    Config {
        /// Config subcommands.
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Tree configuration source shared by tree commands.
#[derive(Debug, clap::Args)]
pub struct TreeConfigArgs {
    /// Tree configuration file. Defaults apply when omitted.
    #[arg(long, env = ASP_CONFIG_FILE)]
    pub config: Option<PathBuf>,
    /// Override the configured hash function (`sha256`, `poseidon`, `poseidon2` or `mimc7`).
    #[arg(long, env = ASP_HASH_FUNCTION, value_parser = parse_hash_function)]
    pub hash_function: Option<HashFunctionName>,
}

/// Arguments for `root`.
#[derive(Debug, clap::Args)]
pub struct RootArgs {
    /// JSON array of privacy-pool events.
    #[arg(long, env = ASP_EVENTS_FILE, default_value = DEFAULT_EVENTS_FILE)]
    pub events: PathBuf,
    /// Tree configuration.
    #[command(flatten)]
    pub config: TreeConfigArgs,
    /// Optional JSON report output file.
    #[arg(long, env = ASP_ROOT_OUT)]
    pub out: Option<PathBuf>,
}

/// Arguments for `prove`.
#[derive(Debug, clap::Args)]
pub struct ProveArgs {
    /// JSON array of privacy-pool events.
    #[arg(long, env = ASP_EVENTS_FILE, default_value = DEFAULT_EVENTS_FILE)]
    pub events: PathBuf,
    /// Namespace to prove, hex encoded with an optional `0x` prefix.
    #[arg(long, env = ASP_NAMESPACE, value_parser = parse_namespace)]
    pub namespace: NamespaceId,
    /// Tree configuration.
    #[command(flatten)]
    pub config: TreeConfigArgs,
    /// Optional JSON report output file.
    #[arg(long, env = ASP_PROOF_OUT)]
    pub out: Option<PathBuf>,
}

fn parse_hash_function(s: &str) -> Result<HashFunctionName> {
    Ok(asp_nmt::hash_function(s.trim())?)
}

fn parse_namespace(s: &str) -> Result<NamespaceId> {
    let bytes = decode_prefixed_hex(s)?;
    ensure!(!bytes.is_empty(), "Namespace must not be empty");
    Ok(NamespaceId::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_accepts_prefixed_and_bare_hex() {
        let prefixed = parse_namespace("0x00ff").expect("prefixed hex");
        let bare = parse_namespace("00ff").expect("bare hex");
        assert_eq!(prefixed, bare);
        assert_eq!(prefixed.as_bytes(), &[0x00, 0xff]);
    }

    #[test]
    fn namespace_rejects_empty_and_invalid_hex() {
        assert!(parse_namespace("0x").is_err());
        assert!(parse_namespace("zz").is_err());
    }

    #[test]
    fn hash_function_names_resolve() {
        assert_eq!(
            parse_hash_function("mimc7").expect("registered"),
            HashFunctionName::Mimc7
        );
        assert!(parse_hash_function("blake3").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory as _;
        Cli::command().debug_assert();
    }
}
