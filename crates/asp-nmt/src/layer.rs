//! Tree layers and the full layer stack.

use std::fmt;

use asp_core::base::{Element, NamespaceSize};
use tracing::debug;

use crate::NmtError;
use crate::hash::HashFunction;
use crate::node::{Node, ZeroSide};

/// A run of nodes at one tree level.
///
/// Full layers start at index 0. Layers taken from a proof are windows of a
/// full layer and record the absolute index of their first node in `offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    offset: usize,
    nodes: Vec<Node>,
}

impl Layer {
    /// A full layer.
    #[must_use]
    pub const fn new(nodes: Vec<Node>) -> Self {
        Self { offset: 0, nodes }
    }

    /// A window of a full layer starting at absolute index `offset`.
    #[must_use]
    pub const fn window(offset: usize, nodes: Vec<Node>) -> Self {
        Self { offset, nodes }
    }

    /// Absolute index of the first node.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute index one past the last node.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.nodes.len())
    }

    /// Nodes in order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the layer holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at absolute index `index`, if the layer holds it.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index.checked_sub(self.offset)?)
    }

    /// Nodes at absolute indices `[start, end)`, if the layer holds all of them.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Option<&[Node]> {
        let from = start.checked_sub(self.offset)?;
        let to = end.checked_sub(self.offset)?;
        self.nodes.get(from..to)
    }

    /// Nodes paired with their absolute index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Node)> {
        (self.offset..).zip(&self.nodes)
    }

    /// Check that `[start, end)` is a non-empty range inside the layer.
    ///
    /// # Errors
    /// Returns [`NmtError::InvalidRange`] otherwise.
    pub fn validate_range(&self, start: usize, end: usize) -> Result<(), NmtError> {
        if start >= end || start < self.offset || end > self.end() {
            return Err(NmtError::InvalidRange {
                start,
                end,
                width: self.len(),
            });
        }
        Ok(())
    }

    /// Node hashes in order.
    #[must_use]
    pub fn hashes(&self) -> Vec<Element> {
        self.nodes.iter().map(Node::hash).collect()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Num Of Nodes: {} Offset: {}", self.len(), self.offset)?;
        for node in &self.nodes {
            writeln!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Width of `level` in a tree over `leaves` leaves: `ceil(leaves / 2^level)`.
#[must_use]
pub fn layer_count(level: usize, leaves: usize) -> usize {
    (0..level).fold(leaves, |width, _| width.div_ceil(2))
}

/// Number of layers in a tree over `leaves` leaves: `ceil(log2(leaves)) + 1`.
///
/// # Errors
/// Returns [`NmtError::EmptyLayer`] for zero leaves.
pub fn tree_depth(leaves: usize) -> Result<usize, NmtError> {
    if leaves == 0 {
        return Err(NmtError::EmptyLayer);
    }
    let mut depth = 1_usize;
    let mut width = leaves;
    while width > 1 {
        width = width.div_ceil(2);
        depth = depth.saturating_add(1);
    }
    Ok(depth)
}

/// Build the next layer of `width` parents from `prev`.
///
/// A trailing child without a sibling is paired with `zero` on the right.
#[must_use]
pub fn build_layer<H: HashFunction + ?Sized>(
    hasher: &H,
    width: usize,
    prev: &Layer,
    zero: &Node,
) -> Layer {
    let nodes = prev
        .nodes
        .chunks(2)
        .take(width)
        .filter_map(|pair| {
            let (left, rest) = pair.split_first()?;
            Some(match rest.first() {
                Some(right) => Node::combine(left, right, ZeroSide::None, hasher),
                None => Node::combine(left, zero, ZeroSide::Right, hasher),
            })
        })
        .collect();
    Layer::new(nodes)
}

/// Compute the root over `leaves`. Returns the root and the number of levels
/// above the leaves.
///
/// # Errors
/// Returns [`NmtError::EmptyLayer`] if `leaves` is empty.
pub fn calc_root<H: HashFunction + ?Sized>(
    size: NamespaceSize,
    hasher: &H,
    leaves: &Layer,
    zero: Element,
) -> Result<(Node, usize), NmtError> {
    let depth = tree_depth(leaves.len())?;
    let mut zero = zero;
    let mut current = leaves.clone();

    for level in 1..depth {
        current = build_layer(
            hasher,
            layer_count(level, leaves.len()),
            &current,
            &Node::zero(size, zero),
        );
        zero = hasher.hash(&zero, &zero);
    }

    let root = current
        .nodes
        .into_iter()
        .next()
        .ok_or(NmtError::RootUnavailable("top layer is empty"))?;
    let levels = depth.saturating_sub(1);
    debug!(levels, root = %root.hash(), "Calculated root");
    Ok((root, levels))
}

/// Layers from the leaves (level 0) to the root, and the leaf count they
/// were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerStack {
    leaf_count: usize,
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Assemble a stack over `leaf_count` leaves.
    #[must_use]
    pub const fn from_parts(leaf_count: usize, layers: Vec<Layer>) -> Self {
        Self { leaf_count, layers }
    }

    /// Number of leaves of the tree the stack belongs to.
    #[must_use]
    pub const fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of layers, leaves and root included.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Number of levels above the leaves.
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Whether the stack holds no layers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers from leaves to root.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The layer at `level`.
    ///
    /// # Errors
    /// Returns [`NmtError::InvalidLevel`] if the stack has no such level.
    pub fn layer(&self, level: usize) -> Result<&Layer, NmtError> {
        self.layers.get(level).ok_or(NmtError::InvalidLevel {
            level,
            depth: self.depth(),
        })
    }

    /// The leaf layer.
    #[must_use]
    pub fn leaves(&self) -> Option<&Layer> {
        self.layers.first()
    }

    /// The single node of the top layer.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.layers.last()?.nodes.first()
    }

    /// Real width of `level`, excluding padding.
    #[must_use]
    pub fn width(&self, level: usize) -> usize {
        layer_count(level, self.leaf_count)
    }
}

/// Build every layer over `leaves`. Returns the stack and the zero value of
/// each level.
///
/// # Errors
/// Returns [`NmtError::EmptyLayer`] if `leaves` is empty.
pub fn build_layer_stack<H: HashFunction + ?Sized>(
    size: NamespaceSize,
    hasher: &H,
    leaves: Layer,
    zero: Element,
) -> Result<(LayerStack, Vec<Element>), NmtError> {
    let leaf_count = leaves.len();
    let depth = tree_depth(leaf_count)?;
    let mut layers = Vec::with_capacity(depth);
    let mut zeros = Vec::with_capacity(depth);
    layers.push(leaves);
    zeros.push(zero);

    let mut zero = zero;
    for level in 1..depth {
        let Some(prev) = layers.last() else { break };
        let next = build_layer(
            hasher,
            layer_count(level, leaf_count),
            prev,
            &Node::zero(size, zero),
        );
        layers.push(next);
        zero = hasher.hash(&zero, &zero);
        zeros.push(zero);
    }

    debug!(leaf_count, depth, "Built layer stack");
    Ok((LayerStack::from_parts(leaf_count, layers), zeros))
}
