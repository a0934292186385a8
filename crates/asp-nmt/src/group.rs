//! Records grouped by namespace, kept in ascending namespace order.

use std::collections::HashMap;
use std::ops::Range;

use asp_core::base::{NamespaceId, NamespaceSize};
use tracing::{debug, warn};

use crate::NmtError;
use crate::layer::Layer;
use crate::node::Node;
use crate::record::Record;

/// Records sharing one namespace, in insertion order.
///
/// Insertion order fixes leaf positions, so it is part of the tree root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceGroup {
    records: Vec<Record>,
}

impl NamespaceGroup {
    /// Index of the first record identical to `record`.
    #[must_use]
    pub fn contains(&self, record: &Record) -> Option<usize> {
        self.records.iter().position(|r| r == record)
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the group holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Namespace shared by the group's records.
    #[must_use]
    pub fn namespace(&self) -> Option<&NamespaceId> {
        self.records.first().map(Record::namespace)
    }
}

/// The leaf layer of a grouping and the leaf range of every namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafLayer {
    /// Leaf nodes in namespace order.
    pub layer: Layer,
    /// Contiguous `[start, end)` leaf indices of each namespace.
    pub ranges: HashMap<NamespaceId, Range<usize>>,
}

/// Accumulates records and groups them by namespace.
///
/// Single writer: [`NamespaceGrouping::add`] takes `&mut self`. The namespace
/// list and the group list are index-aligned; both are re-sorted whenever a
/// new namespace arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceGrouping {
    size: NamespaceSize,
    total_records: usize,
    namespaces: Vec<NamespaceId>,
    groups: Vec<NamespaceGroup>,
    index: HashMap<NamespaceId, usize>,
}

impl NamespaceGrouping {
    /// Create an empty grouping for namespaces of `size` bytes.
    #[must_use]
    pub fn new(size: NamespaceSize) -> Self {
        Self {
            size,
            total_records: 0,
            namespaces: Vec::new(),
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Namespace width of every record in the grouping.
    #[must_use]
    pub const fn namespace_size(&self) -> NamespaceSize {
        self.size
    }

    /// Total number of records across all groups.
    #[must_use]
    pub const fn total_records(&self) -> usize {
        self.total_records
    }

    /// Number of distinct namespaces.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Whether no record has been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Distinct namespaces in their current order.
    #[must_use]
    pub fn namespaces(&self) -> &[NamespaceId] {
        &self.namespaces
    }

    /// Decode and add an encoded record. Returns its namespace.
    ///
    /// # Errors
    /// Returns [`NmtError::InvalidLeafLength`] if the record is shorter than
    /// the namespace plus the element hash.
    pub fn add(&mut self, bytes: &[u8]) -> Result<NamespaceId, NmtError> {
        let record = Record::from_bytes(self.size, bytes)?;
        self.push(record)
    }

    /// Add a decoded record. Returns its namespace.
    ///
    /// # Errors
    /// Returns [`NmtError::InvalidNamespace`] if the record's namespace does
    /// not have the grouping's width.
    pub fn push(&mut self, record: Record) -> Result<NamespaceId, NmtError> {
        let namespace = record.namespace().clone();
        if namespace.size() != self.size.bytes() {
            return Err(NmtError::InvalidNamespace {
                got: namespace.size(),
                want: self.size.bytes(),
            });
        }

        if let Some(group) = self
            .index
            .get(&namespace)
            .and_then(|&i| self.groups.get_mut(i))
        {
            group.records.push(record);
        } else {
            self.index.insert(namespace.clone(), self.namespaces.len());
            self.namespaces.push(namespace.clone());
            self.groups.push(NamespaceGroup {
                records: vec![record],
            });
            self.sort();
        }
        self.total_records = self.total_records.saturating_add(1);

        Ok(namespace)
    }

    /// Order namespaces ascending, permuting groups in lockstep.
    pub fn sort(&mut self) {
        let mut paired: Vec<(NamespaceId, NamespaceGroup)> = self
            .namespaces
            .drain(..)
            .zip(self.groups.drain(..))
            .collect();
        paired.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        self.index.clear();
        for (i, (namespace, group)) in paired.into_iter().enumerate() {
            self.index.insert(namespace.clone(), i);
            self.namespaces.push(namespace);
            self.groups.push(group);
        }
    }

    /// Check that the namespace list is strictly ascending.
    ///
    /// # Errors
    /// Returns [`NmtError::InvalidOrder`] naming the first offending pair.
    pub fn validate_order(&self) -> Result<(), NmtError> {
        match self
            .namespaces
            .windows(2)
            .position(|pair| matches!(pair, [a, b] if !a.less(b)))
        {
            Some(index) => Err(NmtError::InvalidOrder { index }),
            None => Ok(()),
        }
    }

    /// Validate the namespace order, sorting if it was broken, and return it.
    pub fn validate_and_sort(&mut self) -> &[NamespaceId] {
        if let Err(e) = self.validate_order() {
            warn!(error = %e, "Namespace order broken, re-sorting");
            self.sort();
        }
        &self.namespaces
    }

    /// Records of `namespace`, or an empty slice if it has none.
    #[must_use]
    pub fn get_records(&self, namespace: &NamespaceId) -> &[Record] {
        self.index
            .get(namespace)
            .and_then(|&i| self.groups.get(i))
            .map(NamespaceGroup::records)
            .unwrap_or_default()
    }

    /// Group of `namespace`, if any record carries it.
    #[must_use]
    pub fn group(&self, namespace: &NamespaceId) -> Option<&NamespaceGroup> {
        self.index.get(namespace).and_then(|&i| self.groups.get(i))
    }

    /// Build the leaf layer in namespace order and the leaf range of each namespace.
    pub fn leaf_layer(&mut self) -> LeafLayer {
        self.validate_and_sort();

        let mut nodes = Vec::with_capacity(self.total_records);
        let mut ranges = HashMap::with_capacity(self.namespaces.len());
        for (namespace, group) in self.namespaces.iter().zip(&self.groups) {
            let start = nodes.len();
            nodes.extend(group.records.iter().map(Node::from_record));
            ranges.insert(namespace.clone(), start..nodes.len());
        }
        debug!(
            leaves = nodes.len(),
            namespaces = ranges.len(),
            "Built leaf layer"
        );

        LeafLayer {
            layer: Layer::new(nodes),
            ranges,
        }
    }
}
