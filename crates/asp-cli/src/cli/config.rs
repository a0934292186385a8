//! Config subcommands.

use std::path::PathBuf;

use super::constants::{ASP_CONFIG_OUT, DEFAULT_CONFIG_FILE};

/// Config subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum ConfigCommands {
    /// Write the default tree configuration.
    Init {
        /// Configuration output file.
        #[arg(long, env = ASP_CONFIG_OUT, default_value = DEFAULT_CONFIG_FILE)]
        out: PathBuf,
    },
}
