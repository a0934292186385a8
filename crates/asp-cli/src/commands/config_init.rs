use std::path::PathBuf;

use asp_core::schema::config::TreeConfig;
use tracing::info;

use super::write_json;

/// Write the default tree configuration to `out`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub async fn config_init(out: PathBuf) -> eyre::Result<()> {
    let config = TreeConfig::default();
    write_json(&out, &config).await?;
    info!(
        hash_function = config.hash_function.as_str(),
        namespace_size = config.namespace_size,
        "Default tree configuration written"
    );
    Ok(())
}
