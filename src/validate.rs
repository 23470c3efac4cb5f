//! Structural and coloring checks.
//!
//! [`RedBlackTree::validate`] walks the whole tree and reports the first
//! broken property it finds. It never panics and never mutates the tree, so
//! it is safe to call from tests, fuzzers, and debug tooling at any time.

use std::cmp::Ordering;

use thiserror::Error;

use crate::comparator::Comparator;
use crate::iter::{Iter, PreOrder};
use crate::node::NodeId;
use crate::tree::{NodeStack, RedBlackTree};

// =============================================================================
// InvariantViolation Definition
// =============================================================================

/// A broken red-black tree property, as reported by
/// [`RedBlackTree::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The root node has a parent link.
    #[error("root {root} has a parent")]
    RootHasParent {
        /// The root node.
        root: NodeId,
    },

    /// The root node is red.
    #[error("root {root} is red")]
    RedRoot {
        /// The root node.
        root: NodeId,
    },

    /// A child does not point back at the node that holds it.
    #[error("child {child} of {parent} does not link back to its parent")]
    BrokenParentLink {
        /// The node holding the child link.
        parent: NodeId,
        /// The child whose parent link disagrees.
        child: NodeId,
    },

    /// A red node has a red child.
    #[error("red node {node} has red child {child}")]
    RedChildOfRed {
        /// The red parent.
        node: NodeId,
        /// The red child.
        child: NodeId,
    },

    /// The two subtrees of a node hold different numbers of black nodes on
    /// their paths down to the leaves.
    #[error("black heights under {node} differ: left {left}, right {right}")]
    BlackHeightMismatch {
        /// The node whose subtrees disagree.
        node: NodeId,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// An in-order walk reaches a value that sorts before its predecessor,
    /// or an equal value inserted before its predecessor.
    #[error("node {node} is out of order")]
    OutOfOrder {
        /// The node reached out of order.
        node: NodeId,
    },

    /// Some stored nodes cannot be reached from the root.
    #[error("only {reachable} of {total} nodes are reachable from the root")]
    UnreachableNodes {
        /// Nodes reachable from the root.
        reachable: usize,
        /// Nodes stored in the tree.
        total: usize,
    },

    /// A node is reachable along more than one path.
    #[error("node {node} is reachable along more than one path")]
    Cycle {
        /// The node reached twice.
        node: NodeId,
    },
}

// =============================================================================
// Validation
// =============================================================================

impl<T, C: Comparator<T>> RedBlackTree<T, C> {
    /// Checks every red-black tree property.
    ///
    /// Verified, in order:
    ///
    /// 1. the root has no parent and every child links back to its parent
    /// 2. every stored node is reachable from the root exactly once
    /// 3. an in-order walk is non-decreasing, with equal values in insertion
    ///    order
    /// 4. the root is black
    /// 5. no red node has a red child
    /// 6. every root-to-leaf path holds the same number of black nodes
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Complexity
    ///
    /// O(n) time and O(n) extra space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = (1..=100).collect();
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.validate_structure()?;
        self.validate_colors()
    }

    /// Checks links, reachability, and ordering, ignoring colors.
    ///
    /// Lets rotation tests check a tree whose colors are deliberately left
    /// unbalanced.
    pub(crate) fn validate_structure(&self) -> Result<(), InvariantViolation> {
        let total = self.nodes.len();
        let Some(root) = self.root else {
            return if total == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::UnreachableNodes {
                    reachable: 0,
                    total,
                })
            };
        };

        if self.nodes[root].parent.is_some() {
            return Err(InvariantViolation::RootHasParent { root: NodeId(root) });
        }

        let mut visited = vec![false; total];
        let mut reachable = 0;
        let mut pending = NodeStack::new();
        pending.push(root);
        while let Some(index) = pending.pop() {
            if std::mem::replace(&mut visited[index], true) {
                return Err(InvariantViolation::Cycle { node: NodeId(index) });
            }
            reachable += 1;
            let node = &self.nodes[index];
            for child in [node.left, node.right].into_iter().flatten() {
                if self.nodes[child].parent != Some(index) {
                    return Err(InvariantViolation::BrokenParentLink {
                        parent: NodeId(index),
                        child: NodeId(child),
                    });
                }
                pending.push(child);
            }
        }
        if reachable != total {
            return Err(InvariantViolation::UnreachableNodes { reachable, total });
        }

        let mut in_order = Iter::new(&self.nodes, self.root);
        let mut previous = in_order.next_index();
        while let Some(index) = in_order.next_index() {
            if let Some(before) = previous {
                let ordering = self
                    .comparator()
                    .compare(&self.nodes[before].value, &self.nodes[index].value);
                let out_of_order = match ordering {
                    Ordering::Greater => true,
                    Ordering::Equal => before > index,
                    Ordering::Less => false,
                };
                if out_of_order {
                    return Err(InvariantViolation::OutOfOrder { node: NodeId(index) });
                }
            }
            previous = Some(index);
        }
        Ok(())
    }
}

impl<T, C> RedBlackTree<T, C> {
    /// Checks root color, red-red edges, and black heights.
    ///
    /// Assumes the structure is sound.
    fn validate_colors(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.nodes[root].color.is_red() {
            return Err(InvariantViolation::RedRoot { root: NodeId(root) });
        }

        // Reversed pre-order visits every child before its parent.
        let mut pre_order = PreOrder::new(&self.nodes, self.root);
        let order: Vec<usize> = std::iter::from_fn(|| pre_order.next_index()).collect();
        let mut black_heights = vec![0usize; self.nodes.len()];
        for &index in order.iter().rev() {
            let node = &self.nodes[index];
            if node.color.is_red() {
                let red_child = [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .find(|&child| self.nodes[child].color.is_red());
                if let Some(child) = red_child {
                    return Err(InvariantViolation::RedChildOfRed {
                        node: NodeId(index),
                        child: NodeId(child),
                    });
                }
            }

            let left = node.left.map_or(0, |child| black_heights[child]);
            let right = node.right.map_or(0, |child| black_heights[child]);
            if left != right {
                return Err(InvariantViolation::BlackHeightMismatch {
                    node: NodeId(index),
                    left,
                    right,
                });
            }
            black_heights[index] = left + usize::from(node.color.is_black());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
