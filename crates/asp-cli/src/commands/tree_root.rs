use std::path::PathBuf;

use asp_core::schema::config::{HashFunctionName, TreeConfig};
use asp_nmt::{LeafLayer, Node, calc_root};
use serde::Serialize;
use tracing::{info, instrument};

use super::{load_config, load_events, write_json};

/// Summary of a built tree.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TreeReport {
    /// Compression function the tree was built with.
    pub hash_function: HashFunctionName,
    /// Namespace width in bytes.
    pub namespace_size: u8,
    /// Encoded root node: minimum namespace, maximum namespace and hash.
    pub root: String,
    /// Root hash.
    pub root_hash: String,
    /// Smallest namespace in the tree.
    pub min_namespace: String,
    /// Largest namespace in the tree.
    pub max_namespace: String,
    /// Number of leaves.
    pub leaves: usize,
    /// Number of levels above the leaves.
    pub levels: usize,
}

impl TreeReport {
    fn new(config: &TreeConfig, root: &Node, leaves: usize, levels: usize) -> Self {
        Self {
            hash_function: config.hash_function,
            namespace_size: config.namespace_size,
            root: root.to_hex(),
            root_hash: root.hash().to_hex(),
            min_namespace: root.min_ns().to_hex(),
            max_namespace: root.max_ns().to_hex(),
            leaves,
            levels,
        }
    }
}

/// Build the tree over `events_file` and report its root.
///
/// # Errors
/// Returns an error if the inputs cannot be read or the tree cannot be built.
#[instrument(skip_all, fields(events = %events_file.display()))]
pub async fn tree_root(
    events_file: PathBuf,
    config_file: Option<PathBuf>,
    hash_function: Option<HashFunctionName>,
    report_file: Option<PathBuf>,
) -> eyre::Result<()> {
    let config = load_config(config_file.as_deref(), hash_function).await?;
    let mut grouping = load_events(&events_file, &config).await?;

    let LeafLayer { layer, .. } = grouping.leaf_layer();
    let (root, levels) = calc_root(
        config.namespace_size(),
        &config.hash_function,
        &layer,
        config.zero_element(),
    )?;
    let report = TreeReport::new(&config, &root, layer.len(), levels);
    info!(
        hash_function = config.hash_function.as_str(),
        root = %report.root_hash,
        min = %report.min_namespace,
        max = %report.max_namespace,
        leaves = report.leaves,
        levels = report.levels,
        "Tree built"
    );

    if let Some(path) = report_file {
        write_json(&path, &report).await?;
    }
    Ok(())
}
