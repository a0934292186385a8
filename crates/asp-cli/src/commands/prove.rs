use std::path::PathBuf;

use asp_core::base::NamespaceId;
use asp_core::schema::config::HashFunctionName;
use asp_nmt::{LeafLayer, Node, Proof, calc_root, prove_namespace};
use eyre::ensure;
use serde::Serialize;
use tracing::{info, instrument};

use super::{load_config, load_events, write_json};

/// Outcome of proving one namespace.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProofReport {
    /// Proven namespace.
    pub namespace: String,
    /// `empty`, `inclusion` or `absence`.
    pub kind: &'static str,
    /// First leaf of the proven range.
    pub start: usize,
    /// One past the last leaf of the proven range.
    pub end: usize,
    /// Root hash the proof was checked against.
    pub root_hash: String,
    /// Encoded leaf bracketing an absent namespace.
    pub leaf: Option<String>,
    /// Whether the proof verified against the root.
    pub verified: bool,
}

impl ProofReport {
    fn new(namespace: &NamespaceId, proof: &Proof, root_hash: String, verified: bool) -> Self {
        Self {
            namespace: namespace.to_hex(),
            kind: proof.kind().as_str(),
            start: proof.start(),
            end: proof.end(),
            root_hash,
            leaf: proof.leaf_hash().map(Node::to_hex),
            verified,
        }
    }
}

/// Prove `namespace` against the tree built over `events_file` and check the
/// proof against the tree's root.
///
/// # Errors
/// Returns an error if the inputs cannot be read, the namespace has the wrong
/// width, or the proof does not verify.
#[instrument(skip_all, fields(namespace = %namespace))]
pub async fn prove(
    events_file: PathBuf,
    namespace: NamespaceId,
    config_file: Option<PathBuf>,
    hash_function: Option<HashFunctionName>,
    report_file: Option<PathBuf>,
) -> eyre::Result<()> {
    let config = load_config(config_file.as_deref(), hash_function).await?;
    let mut grouping = load_events(&events_file, &config).await?;
    let hasher = config.hash_function;
    let zero = config.zero_element();

    let LeafLayer { layer, .. } = grouping.leaf_layer();
    let (root, _) = calc_root(config.namespace_size(), &hasher, &layer, zero)?;

    let proof = prove_namespace(&mut grouping, &hasher, zero, &namespace)?;
    let verified = proof.verify_namespace(&hasher, &root, &namespace)?;
    let report = ProofReport::new(&namespace, &proof, root.hash().to_hex(), verified);
    info!(
        kind = report.kind,
        start = report.start,
        end = report.end,
        root = %report.root_hash,
        verified,
        "Namespace proven"
    );

    if let Some(path) = report_file {
        write_json(&path, &report).await?;
    }
    ensure!(
        verified,
        "Proof for namespace {namespace} does not verify against root {}",
        report.root_hash
    );
    Ok(())
}
