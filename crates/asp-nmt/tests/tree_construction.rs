#![allow(missing_docs)]
#![allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "Test code should panic on invalid data"
)]

use asp_core::base::{Element, NamespaceId, NamespaceSize};
use asp_core::schema::config::{HashFunctionName, MERKLE_ZERO};
use asp_nmt::{
    HashFunction, LeafLayer, NamespaceGrouping, Node, build_layer_stack, calc_root, tree_depth,
};
use test_utils::{el, ns, record_bytes};

const SIZE: usize = 8;

fn nine_leaf_grouping() -> (NamespaceGrouping, Vec<Vec<u8>>) {
    let mut grouping = NamespaceGrouping::new(NamespaceSize::new(8));
    let mut records = Vec::new();
    // Insert out of namespace order; each namespace keeps its own insertion order.
    for (hash, namespace) in (1_u8..).zip([30_u8, 10, 20, 10, 30, 20, 20, 10, 30]) {
        let bytes = record_bytes(&ns!(SIZE, namespace), el!(hash), b"payload");
        grouping.add(&bytes).expect("valid record");
        records.push(bytes);
    }
    (grouping, records)
}

/// Root of a perfect binary tree over `leaves`, padded on the right, built
/// recursively without the layer code.
fn reference_root(
    hasher: &HashFunctionName,
    leaves: &[(Vec<u8>, Element)],
    zero: Element,
) -> (Option<(Vec<u8>, Vec<u8>)>, Element) {
    fn subtree(
        hasher: &HashFunctionName,
        leaves: &[(Vec<u8>, Element)],
        zeros: &[Element],
        level: usize,
        index: usize,
    ) -> (Option<(Vec<u8>, Vec<u8>)>, Element) {
        if level == 0 {
            return leaves.get(index).map_or((None, zeros[0]), |(ns, hash)| {
                (Some((ns.clone(), ns.clone())), *hash)
            });
        }
        let (left_range, left_hash) = subtree(hasher, leaves, zeros, level - 1, 2 * index);
        let (right_range, right_hash) = subtree(hasher, leaves, zeros, level - 1, 2 * index + 1);
        let range = match (left_range, right_range) {
            (Some((min, _)), Some((_, max))) => Some((min, max)),
            (left, None) => left,
            (None, right) => right,
        };
        (range, hasher.hash(&left_hash, &right_hash))
    }

    let levels = tree_depth(leaves.len()).expect("non-empty") - 1;
    let mut zeros = vec![zero];
    for _ in 0..levels {
        let last = *zeros.last().expect("seeded");
        zeros.push(hasher.hash(&last, &last));
    }
    subtree(hasher, leaves, &zeros, levels, 0)
}

#[test]
fn nine_leaves_over_three_namespaces() {
    let hasher = HashFunctionName::Poseidon;
    let zero = Element::new(MERKLE_ZERO);
    let (mut grouping, _) = nine_leaf_grouping();

    assert_eq!(grouping.total_records(), 9);
    assert_eq!(grouping.len(), 3);

    let LeafLayer { layer, ranges } = grouping.leaf_layer();
    assert_eq!(ranges[&NamespaceId::new(ns!(SIZE, 10))], 0..3);
    assert_eq!(ranges[&NamespaceId::new(ns!(SIZE, 20))], 3..6);
    assert_eq!(ranges[&NamespaceId::new(ns!(SIZE, 30))], 6..9);

    let (root, levels) =
        calc_root(NamespaceSize::new(8), &hasher, &layer, zero).expect("root");
    // Nine leaves make five layers (9, 5, 3, 2, 1): depth 5, four levels above the leaves.
    assert_eq!(levels, 4);
    assert_eq!(root.min_ns(), &NamespaceId::new(ns!(SIZE, 10)));
    assert_eq!(root.max_ns(), &NamespaceId::new(ns!(SIZE, 30)));

    // Leaf order: namespace 10 got records 2, 4, 8; 20 got 3, 6, 7; 30 got 1, 5, 9.
    let expected_order = [2_u8, 4, 8, 3, 6, 7, 1, 5, 9];
    let leaf_hashes: Vec<Element> = layer.hashes();
    let expected: Vec<Element> = expected_order.iter().map(|&h| Element::new(el!(h))).collect();
    assert_eq!(leaf_hashes, expected);

    let reference_leaves: Vec<(Vec<u8>, Element)> = layer
        .nodes()
        .iter()
        .map(|node| (node.min_ns().as_bytes().to_vec(), node.hash()))
        .collect();
    let (range, hash) = reference_root(&hasher, &reference_leaves, zero);
    assert_eq!(hash, root.hash());
    assert_eq!(range, Some((ns!(SIZE, 10), ns!(SIZE, 30))));
}

#[test]
fn reference_tree_agrees_for_every_width() {
    let zero = Element::new(MERKLE_ZERO);
    for hasher in [HashFunctionName::Sha256, HashFunctionName::Mimc7] {
        for width in 1..=17_u8 {
            let mut grouping = NamespaceGrouping::new(NamespaceSize::new(8));
            for i in 0..width {
                let bytes = record_bytes(&ns!(SIZE, i / 2 + 1), el!(i), &[]);
                grouping.add(&bytes).expect("valid record");
            }
            let LeafLayer { layer, .. } = grouping.leaf_layer();
            let reference_leaves: Vec<(Vec<u8>, Element)> = layer
                .nodes()
                .iter()
                .map(|node| (node.min_ns().as_bytes().to_vec(), node.hash()))
                .collect();

            let (root, _) = calc_root(NamespaceSize::new(8), &hasher, &layer, zero).expect("root");
            let (range, hash) = reference_root(&hasher, &reference_leaves, zero);
            assert_eq!(hash, root.hash(), "{hasher:?} width {width}");
            assert_eq!(
                range,
                Some((root.min_ns().as_bytes().to_vec(), root.max_ns().as_bytes().to_vec()))
            );
        }
    }
}

#[test]
fn root_is_deterministic() {
    let hasher = HashFunctionName::Poseidon2;
    let zero = Element::new(MERKLE_ZERO);
    let (mut first, records) = nine_leaf_grouping();

    let mut second = NamespaceGrouping::new(NamespaceSize::new(8));
    for bytes in &records {
        second.add(bytes).expect("valid record");
    }

    let root_of = |grouping: &mut NamespaceGrouping| {
        let LeafLayer { layer, .. } = grouping.leaf_layer();
        calc_root(NamespaceSize::new(8), &hasher, &layer, zero).expect("root").0
    };
    assert_eq!(root_of(&mut first), root_of(&mut second));
}

#[test]
fn intra_namespace_order_changes_root() {
    let hasher = HashFunctionName::Sha256;
    let zero = Element::new(MERKLE_ZERO);
    let (_, records) = nine_leaf_grouping();

    // Swap the first two records of namespace 10 (insertion positions 1 and 3).
    let mut swapped = records.clone();
    swapped.swap(1, 3);

    let root_of = |records: &[Vec<u8>]| {
        let mut grouping = NamespaceGrouping::new(NamespaceSize::new(8));
        for bytes in records {
            grouping.add(bytes).expect("valid record");
        }
        let LeafLayer { layer, .. } = grouping.leaf_layer();
        calc_root(NamespaceSize::new(8), &hasher, &layer, zero).expect("root").0
    };

    let original = root_of(&records);
    let reordered = root_of(&swapped);
    assert_ne!(original.hash(), reordered.hash());
    assert_eq!(original.min_ns(), reordered.min_ns());
    assert_eq!(original.max_ns(), reordered.max_ns());
}

#[test]
fn odd_layers_pad_with_cascaded_zero() {
    let hasher = HashFunctionName::Mimc7;
    let zero = Element::new(MERKLE_ZERO);
    let (mut grouping, _) = nine_leaf_grouping();
    let LeafLayer { layer, .. } = grouping.leaf_layer();

    let (stack, zeros) =
        build_layer_stack(NamespaceSize::new(8), &hasher, layer, zero).expect("stack");
    let widths: Vec<usize> = stack.layers().iter().map(asp_nmt::Layer::len).collect();
    assert_eq!(widths, vec![9, 5, 3, 2, 1]);

    // Leaf 8 has no sibling: its parent hashes it with the leaf-level zero.
    let leaves = stack.layer(0).expect("leaves");
    let last_leaf = leaves.get(8).expect("ninth leaf");
    let parent = stack.layer(1).expect("level 1").get(4).expect("fifth parent");
    assert_eq!(parent.hash(), hasher.hash(&last_leaf.hash(), &zeros[0]));
    assert_eq!(parent.max_ns(), last_leaf.max_ns());
    assert_eq!(parent.min_ns(), last_leaf.min_ns());

    // Level 1 has five nodes: its last one is paired with the level-1 zero.
    let grandparent = stack.layer(2).expect("level 2").get(2).expect("third node");
    assert_eq!(grandparent.hash(), hasher.hash(&parent.hash(), &zeros[1]));
    assert_eq!(zeros[1], hasher.hash(&zeros[0], &zeros[0]));

    assert!(Node::zero(NamespaceSize::new(8), zeros[0]).has_zero_namespace());
}
