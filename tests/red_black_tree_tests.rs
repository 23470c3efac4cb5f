//! Integration tests for RedBlackTree.
//!
//! Covers the insertion scenarios end to end through the public API,
//! inspecting shapes and colors with `NodeRef`.

use redblack::comparator::ReverseOrder;
use redblack::{Color, NodeRef, RedBlackTree};
use rstest::rstest;
use std::cmp::Ordering;

fn build(values: &[i32]) -> RedBlackTree<i32> {
    let mut tree = RedBlackTree::new();
    for &value in values {
        tree.insert(value);
    }
    tree
}

fn value_of(node: Option<NodeRef<'_, i32>>) -> Option<i32> {
    node.map(|node| *node.value())
}

fn color_of(node: Option<NodeRef<'_, i32>>) -> Option<Color> {
    node.map(|node| node.color())
}

// =============================================================================
// Insertion Scenarios
// =============================================================================

#[rstest]
fn test_single_insert_makes_black_root() {
    let tree = build(&[10]);

    let root = tree.root().unwrap();
    assert_eq!(root.value(), &10);
    assert_eq!(root.color(), Color::Black);
    assert!(root.is_leaf());
    assert!(root.is_root());
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_ascending_triple_rotates_at_original_root() {
    let tree = build(&[10, 20, 30]);

    let root = tree.root().unwrap();
    assert_eq!(root.value(), &20);
    assert_eq!(root.color(), Color::Black);
    assert_eq!(value_of(root.left()), Some(10));
    assert_eq!(color_of(root.left()), Some(Color::Red));
    assert_eq!(value_of(root.right()), Some(30));
    assert_eq!(color_of(root.right()), Some(Color::Red));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_triangle_is_straightened_then_rotated() {
    let tree = build(&[10, 5, 7]);

    let root = tree.root().unwrap();
    assert_eq!(root.value(), &7);
    assert_eq!(root.color(), Color::Black);
    assert_eq!(value_of(root.left()), Some(5));
    assert_eq!(color_of(root.left()), Some(Color::Red));
    assert_eq!(value_of(root.right()), Some(10));
    assert_eq!(color_of(root.right()), Some(Color::Red));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_red_uncle_recolors_and_keeps_root() {
    let tree = build(&[10, 5, 15, 3, 7]);

    let root = tree.root().unwrap();
    assert_eq!(root.value(), &10);
    assert!(root.is_black());

    let five = root.left().unwrap();
    let fifteen = root.right().unwrap();
    assert_eq!((five.value(), five.color()), (&5, Color::Black));
    assert_eq!((fifteen.value(), fifteen.color()), (&15, Color::Black));
    assert_eq!(value_of(five.left()), Some(3));
    assert_eq!(color_of(five.left()), Some(Color::Red));
    assert_eq!(value_of(five.right()), Some(7));
    assert_eq!(color_of(five.right()), Some(Color::Red));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_mixed_sequence_keeps_all_properties() {
    let tree = build(&[10, 20, 30, 15, 25, 5, 1]);

    let root = tree.root().unwrap();
    assert_eq!(root.value(), &20);
    assert!(root.is_black());
    assert_eq!(color_of(root.right()), Some(Color::Black));
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.validate(), Ok(()));
    for value in [10, 20, 30, 15, 25, 5, 1] {
        assert!(tree.contains(&value), "{value} should be found");
    }
}

#[rstest]
fn test_thousand_ascending_inserts_stay_balanced() {
    let tree: RedBlackTree<u32> = (1..=1000).collect();

    let bound = 2.0 * 1001_f64.log2();
    assert!((tree.height() as f64) <= bound, "height {} > {bound}", tree.height());
    assert_eq!(tree.len(), 1000);
    assert_eq!(tree.validate(), Ok(()));
    assert!(tree.iter().copied().eq(1..=1000));
}

// =============================================================================
// Duplicate Tests
// =============================================================================

#[rstest]
fn test_duplicate_insert_grows_count_by_one() {
    let mut tree = build(&[5, 3, 8]);
    assert_eq!(tree.count(&5), 1);

    tree.insert(5);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.count(&5), 2);
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_repeated_value_only() {
    let tree = build(&[5, 5, 5, 5, 5, 5, 5, 5]);
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.count(&5), 8);
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_equal_keys_keep_insertion_order() {
    let mut tree = RedBlackTree::by_key(|entry: &(i32, usize)| entry.0);
    for (sequence, key) in [3, 1, 3, 2, 3, 1, 3].into_iter().enumerate() {
        tree.insert((key, sequence));
    }

    let entries: Vec<(i32, usize)> = tree.iter().copied().collect();
    assert_eq!(
        entries,
        vec![(1, 1), (1, 5), (2, 3), (3, 0), (3, 2), (3, 4), (3, 6)]
    );
    assert_eq!(tree.validate(), Ok(()));
}

// =============================================================================
// Comparator Tests
// =============================================================================

#[rstest]
fn test_reverse_order_comparator() {
    let mut tree = RedBlackTree::with_comparator(ReverseOrder);
    tree.extend([4, 9, 1, 7]);

    let values: Vec<i32> = tree.iter().copied().collect();
    assert_eq!(values, vec![9, 7, 4, 1]);
    assert_eq!(tree.first(), Some(&9));
    assert_eq!(tree.last(), Some(&1));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_closure_comparator() {
    let mut tree = RedBlackTree::by(|left: &String, right: &String| {
        left.len().cmp(&right.len()).then_with(|| left.cmp(right))
    });
    for word in ["kiwi", "fig", "banana", "apple", "date"] {
        tree.insert(word.to_owned());
    }

    let words: Vec<&str> = tree.iter().map(String::as_str).collect();
    assert_eq!(words, vec!["fig", "date", "kiwi", "apple", "banana"]);
    assert!(tree.contains(&"date".to_owned()));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_comparator_accessor() {
    let tree = RedBlackTree::<i32, _>::with_comparator(ReverseOrder);
    assert_eq!(*tree.comparator(), ReverseOrder);
    assert_eq!(
        redblack::comparator::Comparator::compare(tree.comparator(), &1, &2),
        Ordering::Greater
    );
}

// =============================================================================
// NodeRef Tests
// =============================================================================

#[rstest]
fn test_node_ref_parent_links_mirror_children() {
    let tree: RedBlackTree<i32> = (0..50).collect();
    let mut pending = vec![tree.root().unwrap()];
    while let Some(node) = pending.pop() {
        for child in [node.left(), node.right()].into_iter().flatten() {
            assert_eq!(child.parent(), Some(node));
            pending.push(child);
        }
    }
}

#[rstest]
fn test_node_ids_follow_insertion_order() {
    let tree = build(&[10, 20, 30]);
    let root = tree.root().unwrap();
    assert_eq!(root.id().index(), 1);
    assert_eq!(tree.node(root.id()), Some(root));
    assert_eq!(value_of(tree.node(root.left().unwrap().id())), Some(10));
}

// =============================================================================
// Construction and Trait Tests
// =============================================================================

#[rstest]
fn test_new_and_default_are_empty() {
    let tree: RedBlackTree<i32> = RedBlackTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert!(tree.root().is_none());
    assert_eq!(tree.first(), None);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.validate(), Ok(()));

    let defaulted: RedBlackTree<i32> = RedBlackTree::default();
    assert_eq!(tree, defaulted);
}

#[rstest]
fn test_with_capacity_behaves_like_new() {
    let mut tree = RedBlackTree::with_capacity(16);
    tree.insert("b").insert("a");
    assert_eq!(tree.first(), Some(&"a"));
}

#[rstest]
fn test_clone_is_independent() {
    let original = build(&[1, 2, 3]);
    let mut copy = original.clone();
    copy.insert(4);
    assert_eq!(original.len(), 3);
    assert_eq!(copy.len(), 4);
}

#[rstest]
fn test_display_and_render() {
    let tree = build(&[2, 1, 3]);
    assert_eq!(tree.to_string(), "{1, 2, 3}");
    assert_eq!(tree.render(), "   2\n 1   3");
    assert_eq!(RedBlackTree::<i32>::new().render(), redblack::EMPTY_TREE);
}

#[rstest]
fn test_insert_is_chainable() {
    let mut tree = RedBlackTree::new();
    let length = tree.insert(1).insert(2).insert(3).len();
    assert_eq!(length, 3);
}
