//! Namespace range proofs: generation and verification.
//!
//! A proof carries, for every level below the root, a pair-aligned window of
//! the full layer covering the proven leaves' ancestors and their siblings.
//! Nodes beyond a layer's real width are the level's zero node. The verifier
//! recomputes every node whose two children are present and compares it
//! bit-exactly.
//!
//! Node namespaces are not part of the hash, so only namespaces that flow
//! into recomputed nodes are bound by the root. The rest are held in place by
//! ordering: real nodes never invert or overlap their neighbours.

use asp_core::base::{Element, NamespaceId, NamespaceSize};
use tracing::debug;

use crate::NmtError;
use crate::group::{LeafLayer, NamespaceGrouping};
use crate::hash::HashFunction;
use crate::layer::{Layer, LayerStack, build_layer, calc_root, layer_count, tree_depth};
use crate::node::{Node, ZeroSide};

/// What a proof establishes about its target namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofKind {
    /// The namespace lies outside the tree's namespace range.
    Empty,
    /// The proven leaves are exactly the namespace's records.
    Inclusion,
    /// The namespace lies inside the tree's range but has no leaves.
    Absence,
}

impl ProofKind {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Inclusion => "inclusion",
            Self::Absence => "absence",
        }
    }
}

/// A range proof over leaves `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Proof {
    start: usize,
    end: usize,
    path: LayerStack,
    leaf_hash: Option<Node>,
}

impl Proof {
    /// The canonical empty proof: no range, no layers, no leaf.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Proof that `[start, end)` are the leaves of a namespace.
    #[must_use]
    pub const fn inclusion(start: usize, end: usize, path: LayerStack) -> Self {
        Self {
            start,
            end,
            path,
            leaf_hash: None,
        }
    }

    /// Proof that a namespace is absent, bracketed on the right by `leaf`.
    #[must_use]
    pub const fn absence(start: usize, end: usize, path: LayerStack, leaf: Node) -> Self {
        Self {
            start,
            end,
            path,
            leaf_hash: Some(leaf),
        }
    }

    /// What the proof establishes.
    #[must_use]
    pub const fn kind(&self) -> ProofKind {
        if self.path.is_empty() {
            ProofKind::Empty
        } else if self.leaf_hash.is_some() {
            ProofKind::Absence
        } else {
            ProofKind::Inclusion
        }
    }

    /// First proven leaf index.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last proven leaf index.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Path layers from the leaf window up to the root.
    #[must_use]
    pub const fn path(&self) -> &LayerStack {
        &self.path
    }

    /// Bracketing leaf of an absence proof.
    #[must_use]
    pub const fn leaf_hash(&self) -> Option<&Node> {
        self.leaf_hash.as_ref()
    }

    /// Root carried by the proof.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.path.root()
    }

    /// The proven leaves.
    #[must_use]
    pub fn leaves(&self) -> Option<&[Node]> {
        self.path.leaves()?.slice(self.start, self.end)
    }

    /// Check that the path layers hash up to the proof's root.
    ///
    /// # Errors
    /// Returns [`NmtError::MalformedProof`] if the layers do not have the shape
    /// of a range proof.
    pub fn verify<H: HashFunction + ?Sized>(&self, hasher: &H) -> Result<bool, NmtError> {
        verify_range_proof(hasher, &self.path)
    }

    /// Check the proof against a trusted `root` for `target`.
    ///
    /// An empty proof is valid iff `target` is outside the root's namespace
    /// range. Otherwise the proof's root must equal `root`, the path must
    /// verify and the leaf window must match the proof kind.
    ///
    /// # Errors
    /// Returns [`NmtError::FailedCompletenessCheck`] if the proven leaves or
    /// any path node beside them contradict the proof kind, and
    /// [`NmtError::MalformedProof`] for proofs without a verifiable shape.
    pub fn verify_namespace<H: HashFunction + ?Sized>(
        &self,
        hasher: &H,
        root: &Node,
        target: &NamespaceId,
    ) -> Result<bool, NmtError> {
        let outside = target < root.min_ns() || root.max_ns() < target;
        if self.kind() == ProofKind::Empty {
            return Ok(outside);
        }
        if outside || self.root() != Some(root) || !self.verify(hasher)? {
            return Ok(false);
        }

        if self.start >= self.end {
            return Err(NmtError::MalformedProof("proven range is empty"));
        }
        let leaves = self
            .leaves()
            .ok_or(NmtError::MalformedProof("proven range is outside the leaf window"))?;

        match &self.leaf_hash {
            None => {
                if !leaves.iter().all(|leaf| leaf.min_ns() == target) {
                    return Err(NmtError::FailedCompletenessCheck(
                        "proven leaf outside the namespace",
                    ));
                }
            }
            Some(leaf) => {
                if self.end.checked_sub(self.start) != Some(1)
                    || leaves != std::slice::from_ref(leaf)
                {
                    return Err(NmtError::FailedCompletenessCheck(
                        "bracketing leaf does not match the proven leaf",
                    ));
                }
                if !target.less(leaf.min_ns()) {
                    return Err(NmtError::FailedCompletenessCheck(
                        "bracketing leaf is not above the namespace",
                    ));
                }
            }
        }
        self.check_neighbours(target)?;
        Ok(true)
    }

    /// Check that every real path node outside the proven range lies on its
    /// side of `target`.
    ///
    /// At level `l` the proven range's ancestors are `[start >> l, (end - 1) >> l]`.
    /// Nodes left of them cover only leaves before `start` and need
    /// `max_ns < target`; nodes right of them need `min_ns > target`. Across
    /// all levels these nodes cover every leaf outside the range.
    fn check_neighbours(&self, target: &NamespaceId) -> Result<(), NmtError> {
        let mut first = self.start;
        let mut last = self
            .end
            .checked_sub(1)
            .ok_or(NmtError::MalformedProof("proven range is empty"))?;

        for (level, layer) in self.path.layers().iter().enumerate() {
            let width = self.path.width(level);
            for (index, node) in layer.indexed().filter(|&(index, _)| index < width) {
                if index < first && !node.max_ns().less(target) {
                    return Err(NmtError::FailedCompletenessCheck(
                        "namespace continues left of the proven range",
                    ));
                }
                if index > last && !target.less(node.min_ns()) {
                    return Err(NmtError::FailedCompletenessCheck(
                        "namespace continues right of the proven range",
                    ));
                }
            }
            first /= 2;
            last /= 2;
        }
        Ok(())
    }
}

/// Build the path layers proving leaves `[start, end)`.
///
/// At each level the pair-aligned window `[start - start % 2, end - end % 2 + 2)`,
/// clipped to the padded layer width, is copied; indices past the real width
/// hold the level's zero node. The last layer is the root.
///
/// # Errors
/// Returns [`NmtError::InvalidRange`] unless `0 <= start < end <= leaves.len()`.
pub fn build_range_proof<H: HashFunction + ?Sized>(
    size: NamespaceSize,
    hasher: &H,
    leaves: &Layer,
    zero: Element,
    start: usize,
    end: usize,
) -> Result<LayerStack, NmtError> {
    leaves.validate_range(start, end)?;
    let leaf_count = leaves.len();
    let depth = tree_depth(leaf_count)?;

    let mut path = Vec::with_capacity(depth);
    let mut current = leaves.clone();
    let mut zero = zero;
    let (mut start, mut end) = (start, end);

    for level in 1..depth {
        let zero_node = Node::zero(size, zero);
        // Clipped at the padded width, so an even layer gets no trailing zero
        // pair and path layers can be two nodes shorter than an unclipped window.
        let padded = padded_width(current.len());
        let from = start & !1;
        let to = (end & !1).saturating_add(2).min(padded);

        let window = (from..to)
            .map(|i| current.get(i).cloned().unwrap_or_else(|| zero_node.clone()))
            .collect();
        path.push(Layer::window(from, window));

        current = build_layer(hasher, layer_count(level, leaf_count), &current, &zero_node);
        zero = hasher.hash(&zero, &zero);
        start /= 2;
        end /= 2;
    }

    let root = current
        .nodes()
        .first()
        .cloned()
        .ok_or(NmtError::RootUnavailable("top layer is empty"))?;
    path.push(Layer::new(vec![root]));

    Ok(LayerStack::from_parts(leaf_count, path))
}

/// Check that `path` hashes up to its root.
///
/// Returns `Ok(false)` on the first node that does not match its
/// recomputation, a padding node with non-zero namespaces, a real leaf whose
/// namespaces differ, a real node whose range is inverted or overlaps its
/// neighbour, or a node of another namespace width. A recomputed parent
/// equals its children's combination, so it spans both their ranges.
///
/// # Errors
/// Returns [`NmtError::MalformedProof`] if the layers are empty, do not
/// match the recorded leaf count, or are not nested pair-aligned windows.
pub fn verify_range_proof<H: HashFunction + ?Sized>(
    hasher: &H,
    path: &LayerStack,
) -> Result<bool, NmtError> {
    let layers = path.layers();
    if layers.is_empty() || layers.iter().any(Layer::is_empty) {
        return Err(NmtError::MalformedProof("empty path layer"));
    }
    let depth = tree_depth(path.leaf_count())
        .map_err(|_| NmtError::MalformedProof("proof covers no leaves"))?;
    if layers.len() != depth {
        return Err(NmtError::MalformedProof("depth does not match the leaf count"));
    }
    let root = match path.root() {
        Some(root) if layers.last().is_some_and(|l| l.offset() == 0 && l.len() == 1) => root,
        _ => return Err(NmtError::MalformedProof("top layer must hold the root alone")),
    };
    for pair in layers.windows(2) {
        if let [lower, upper] = pair
            && !is_nested(lower, upper)
        {
            return Err(NmtError::MalformedProof("path layers are not nested windows"));
        }
    }

    let size = root.min_ns().size();
    for (level, layer) in layers.iter().enumerate() {
        if !namespaces_are_ordered(layer, path.width(level), level == 0, size) {
            debug!(level, "Path layer namespaces are out of order");
            return Ok(false);
        }
    }

    for (level, pair) in layers.windows(2).enumerate() {
        let [lower, upper] = pair else { continue };
        let lower_width = path.width(level);
        for (index, node) in upper.indexed() {
            let Some(left_index) = index.checked_mul(2) else {
                return Ok(false);
            };
            let right_index = left_index.saturating_add(1);
            let (Some(left), Some(right)) = (lower.get(left_index), lower.get(right_index)) else {
                continue;
            };
            let zero_side = if right_index >= lower_width {
                ZeroSide::Right
            } else {
                ZeroSide::None
            };
            if Node::combine(left, right, zero_side, hasher) != *node {
                debug!(level, index, "Path node does not match its children");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Prove that `target` is included in, absent from, or outside the tree
/// built from `grouping`.
///
/// # Errors
/// Returns [`NmtError::InvalidNamespace`] if `target` has the wrong width,
/// [`NmtError::RootUnavailable`] if the tree has no level above its leaves,
/// and [`NmtError::InconsistentLeafLayer`] if no leaf brackets an absent
/// namespace inside the tree's range. The last two mean the tree itself is
/// malformed.
pub fn prove_namespace<H: HashFunction + ?Sized>(
    grouping: &mut NamespaceGrouping,
    hasher: &H,
    zero: Element,
    target: &NamespaceId,
) -> Result<Proof, NmtError> {
    let size = grouping.namespace_size();
    if target.size() != size.bytes() {
        return Err(NmtError::InvalidNamespace {
            got: target.size(),
            want: size.bytes(),
        });
    }
    if grouping.total_records() == 0 {
        return Ok(Proof::empty());
    }

    let LeafLayer { layer, ranges } = grouping.leaf_layer();
    let (root, levels) = calc_root(size, hasher, &layer, zero)?;
    if levels == 0 {
        return Err(NmtError::RootUnavailable("tree has no level above its leaves"));
    }

    if target.less(root.min_ns()) || root.max_ns().less(target) {
        debug!(namespace = %target, "Namespace outside tree range");
        return Ok(Proof::empty());
    }

    let (start, end, found) = match ranges.get(target) {
        Some(range) => (range.start, range.end, true),
        None => {
            let index = absence_index(&layer, target)?;
            (index, index.saturating_add(1), false)
        }
    };

    let path = build_range_proof(size, hasher, &layer, zero, start, end)?;
    debug!(namespace = %target, start, end, found, "Built namespace proof");

    if found {
        return Ok(Proof::inclusion(start, end, path));
    }
    let leaf = layer
        .get(start)
        .cloned()
        .ok_or_else(|| NmtError::InconsistentLeafLayer(format!("no leaf at index {start}")))?;
    Ok(Proof::absence(start, end, path, leaf))
}

/// Index of the first leaf above `target` whose left neighbour is below it.
fn absence_index(leaves: &Layer, target: &NamespaceId) -> Result<usize, NmtError> {
    leaves
        .nodes()
        .windows(2)
        .position(|pair| {
            matches!(pair, [prev, next] if prev.max_ns().less(target) && target.less(next.min_ns()))
        })
        .map(|i| i.saturating_add(1))
        .ok_or_else(|| {
            NmtError::InconsistentLeafLayer(format!("no leaves bracket namespace {target}"))
        })
}

/// Namespace shape checks on one path layer.
///
/// Every node has namespaces of `size` bytes. Padding nodes carry the zero
/// namespace. Real nodes have `min_ns <= max_ns`, with equality on leaves,
/// and adjacent real nodes do not overlap.
fn namespaces_are_ordered(layer: &Layer, width: usize, leaves: bool, size: usize) -> bool {
    let mut previous: Option<&Node> = None;
    for (index, node) in layer.indexed() {
        if node.min_ns().size() != size || node.max_ns().size() != size {
            return false;
        }
        if index >= width {
            if !node.has_zero_namespace() {
                return false;
            }
            continue;
        }
        let ordered = if leaves {
            node.min_ns() == node.max_ns()
        } else {
            node.min_ns().less_or_equal(node.max_ns())
        };
        if !ordered || previous.is_some_and(|p| !p.max_ns().less_or_equal(node.min_ns())) {
            return false;
        }
        previous = Some(node);
    }
    true
}

/// Width of a layer rounded up to an even number of nodes.
const fn padded_width(width: usize) -> usize {
    width.saturating_add(width % 2)
}

/// Whether `lower` is pair-aligned and `upper` holds every parent of it.
const fn is_nested(lower: &Layer, upper: &Layer) -> bool {
    lower.offset() % 2 == 0
        && lower.len() % 2 == 0
        && upper.offset() <= lower.offset() / 2
        && upper.end() >= lower.end() / 2
}
