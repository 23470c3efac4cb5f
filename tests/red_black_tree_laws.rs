//! Property-based tests for RedBlackTree.
//!
//! These tests verify that every sequence of inserts leaves a valid
//! red-black tree behind, using proptest.

use proptest::prelude::*;
use redblack::{NodeRef, RedBlackTree};

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// Strategy for generating insertion sequences with frequent duplicates.
fn narrow_values(max_size: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-20..20_i32, 0..max_size)
}

/// Strategy for generating insertion sequences over the full `i32` range.
fn wide_values(max_size: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size)
}

fn subtree_values<'a>(node: Option<NodeRef<'a, i32>>, into: &mut Vec<i32>) {
    let mut pending: Vec<NodeRef<'a, i32>> = node.into_iter().collect();
    while let Some(node) = pending.pop() {
        into.push(*node.value());
        pending.extend(node.left());
        pending.extend(node.right());
    }
}

// =============================================================================
// Structural Laws
// =============================================================================

proptest! {
    /// Law: every insertion sequence yields a tree passing full validation.
    #[test]
    fn prop_insert_preserves_invariants(values in narrow_values(200)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        prop_assert_eq!(tree.validate(), Ok(()));
    }

    /// Law: the root of a non-empty tree is black.
    #[test]
    fn prop_root_is_black(values in wide_values(100)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        if let Some(root) = tree.root() {
            prop_assert!(root.is_black());
        }
    }

    /// Law: no red node has a red child.
    #[test]
    fn prop_no_red_red_edge(values in narrow_values(150)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        let mut pending: Vec<NodeRef<'_, i32>> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            for child in [node.left(), node.right()].into_iter().flatten() {
                prop_assert!(!(node.is_red() && child.is_red()));
                pending.push(child);
            }
        }
    }

    /// Law: distinct values satisfy left subtree < node < right subtree.
    #[test]
    fn prop_distinct_values_are_strictly_ordered(
        values in prop::collection::hash_set(any::<i32>(), 0..100)
    ) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        let mut pending: Vec<NodeRef<'_, i32>> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            let mut left = Vec::new();
            let mut right = Vec::new();
            subtree_values(node.left(), &mut left);
            subtree_values(node.right(), &mut right);
            prop_assert!(left.iter().all(|value| value < node.value()));
            prop_assert!(right.iter().all(|value| value > node.value()));
            pending.extend(node.left());
            pending.extend(node.right());
        }
    }

    /// Law: height never exceeds 2 * log2(n + 1).
    #[test]
    fn prop_height_is_logarithmic(values in wide_values(500)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        let bound = 2.0 * ((tree.len() + 1) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound);
    }

    /// Law: black height matches for every root-to-leaf path, and bounds the
    /// height from below.
    #[test]
    fn prop_black_height_bounds_height(values in wide_values(300)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        prop_assert!(tree.black_height() <= tree.height());
        prop_assert!(tree.height() <= 2 * tree.black_height());
    }
}

// =============================================================================
// Membership and Size Laws
// =============================================================================

proptest! {
    /// Law: every inserted value is found by search.
    #[test]
    fn prop_inserted_values_are_found(values in wide_values(200)) {
        let tree: RedBlackTree<i32> = values.iter().copied().collect();
        for value in &values {
            prop_assert!(tree.contains(value));
            prop_assert_eq!(tree.get(value), Some(value));
        }
    }

    /// Law: the element count equals the number of inserts.
    #[test]
    fn prop_len_counts_every_insert(values in narrow_values(200)) {
        let tree: RedBlackTree<i32> = values.iter().copied().collect();
        prop_assert_eq!(tree.len(), values.len());
        prop_assert_eq!(tree.iter().count(), values.len());
    }

    /// Law: inserting a value already present grows its count by exactly one.
    #[test]
    fn prop_duplicate_insert_counts_once(values in narrow_values(100), extra in -20..20_i32) {
        let mut tree: RedBlackTree<i32> = values.iter().copied().collect();
        let before = tree.count(&extra);
        tree.insert(extra);
        prop_assert_eq!(tree.count(&extra), before + 1);
        prop_assert_eq!(before, values.iter().filter(|&&value| value == extra).count());
    }
}

// =============================================================================
// Ordering Laws
// =============================================================================

proptest! {
    /// Law: in-order iteration equals the sorted input.
    #[test]
    fn prop_iter_is_sorted_input(values in wide_values(200)) {
        let tree: RedBlackTree<i32> = values.iter().copied().collect();
        let mut sorted = values;
        sorted.sort_unstable();
        let collected: Vec<i32> = tree.iter().copied().collect();
        prop_assert_eq!(collected, sorted);
    }

    /// Law: equal keys keep insertion order (the tree sorts stably).
    #[test]
    fn prop_equal_keys_are_stable(keys in prop::collection::vec(0..8_u8, 0..150)) {
        let mut tree = RedBlackTree::by_key(|entry: &(u8, usize)| entry.0);
        let entries: Vec<(u8, usize)> = keys.into_iter().enumerate().map(|(sequence, key)| (key, sequence)).collect();
        tree.extend(entries.iter().copied());

        let mut expected = entries;
        expected.sort_by_key(|entry| entry.0);
        let collected: Vec<(u8, usize)> = tree.iter().copied().collect();
        prop_assert_eq!(collected, expected);
        prop_assert_eq!(tree.validate(), Ok(()));
    }

    /// Law: nth_largest(k) is the k-th element of the reverse-sorted input.
    #[test]
    fn prop_nth_largest_matches_reverse_sort(values in wide_values(100), k in 0..120_usize) {
        let tree: RedBlackTree<i32> = values.iter().copied().collect();
        let mut descending = values;
        descending.sort_unstable_by(|left, right| right.cmp(left));
        let expected = k.checked_sub(1).and_then(|skip| descending.get(skip));
        prop_assert_eq!(tree.nth_largest(k), expected);
    }

    /// Law: nth_smallest(k) is the k-th element of the sorted input.
    #[test]
    fn prop_nth_smallest_matches_sort(values in wide_values(100), k in 0..120_usize) {
        let tree: RedBlackTree<i32> = values.iter().copied().collect();
        let mut ascending = values;
        ascending.sort_unstable();
        let expected = k.checked_sub(1).and_then(|skip| ascending.get(skip));
        prop_assert_eq!(tree.nth_smallest(k), expected);
    }

    /// Law: reverse iteration is the in-order sequence reversed.
    #[test]
    fn prop_rev_iter_reverses_iter(values in narrow_values(100)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        let mut forward: Vec<i32> = tree.iter().copied().collect();
        forward.reverse();
        let backward: Vec<i32> = tree.iter().rev().copied().collect();
        prop_assert_eq!(backward, forward);
    }

    /// Law: every traversal visits each node exactly once.
    #[test]
    fn prop_traversals_visit_every_node(values in narrow_values(100)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        let mut in_order: Vec<i32> = tree.iter().copied().collect();
        in_order.sort_unstable();
        for traversal in [
            tree.pre_order().copied().collect::<Vec<_>>(),
            tree.post_order().copied().collect::<Vec<_>>(),
            tree.level_order().copied().collect::<Vec<_>>(),
        ] {
            let mut sorted = traversal;
            sorted.sort_unstable();
            prop_assert_eq!(&sorted, &in_order);
        }
    }

    /// Law: values at each depth partition the tree.
    #[test]
    fn prop_depth_levels_partition_tree(values in narrow_values(100)) {
        let tree: RedBlackTree<i32> = values.into_iter().collect();
        let total: usize = (0..tree.height()).map(|depth| tree.at_depth(depth).len()).sum();
        prop_assert_eq!(total, tree.len());
        prop_assert!(tree.at_depth(tree.height()).is_empty());
    }
}
