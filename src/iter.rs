//! Traversals and order statistics.
//!
//! Every traversal is lazy and walks the tree with an explicit stack (or
//! queue), so none of them recurses however tall the tree is.
//!
//! | Method | Order |
//! |--------|-------|
//! | [`iter`](RedBlackTree::iter) | in-order (sorted), double-ended |
//! | [`pre_order`](RedBlackTree::pre_order) | node, left subtree, right subtree |
//! | [`post_order`](RedBlackTree::post_order) | left subtree, right subtree, node |
//! | [`level_order`](RedBlackTree::level_order) | breadth-first, left to right |

use std::collections::VecDeque;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::comparator::Comparator;
use crate::node::{Node, Side};
use crate::tree::{NodeStack, RedBlackTree, STACK_INLINE_CAPACITY};

// =============================================================================
// Tree Methods
// =============================================================================

impl<T, C> RedBlackTree<T, C> {
    /// Returns an iterator over the values in sorted order.
    ///
    /// Equal values come out in insertion order. The iterator is
    /// double-ended, so `.rev()` walks from the largest value down.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [5, 1, 4, 2, 3].into_iter().collect();
    ///
    /// let ascending: Vec<&i32> = tree.iter().collect();
    /// assert_eq!(ascending, vec![&1, &2, &3, &4, &5]);
    ///
    /// let descending: Vec<&i32> = tree.iter().rev().collect();
    /// assert_eq!(descending, vec![&5, &4, &3, &2, &1]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.root)
    }

    /// Returns an iterator visiting each node before its subtrees.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [10, 5, 15, 3, 7].into_iter().collect();
    /// let values: Vec<&i32> = tree.pre_order().collect();
    /// assert_eq!(values, vec![&10, &5, &3, &7, &15]);
    /// ```
    #[must_use]
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(&self.nodes, self.root)
    }

    /// Returns an iterator visiting each node after its subtrees.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [10, 5, 15, 3, 7].into_iter().collect();
    /// let values: Vec<&i32> = tree.post_order().collect();
    /// assert_eq!(values, vec![&3, &7, &5, &15, &10]);
    /// ```
    #[must_use]
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(&self.nodes, self.root)
    }

    /// Returns an iterator visiting the tree level by level, left to right.
    #[must_use]
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(&self.nodes, self.root)
    }

    /// Returns the `k`-th smallest value, counting from 1.
    ///
    /// Returns `None` if `k` is `0` or larger than [`len`](Self::len).
    #[must_use]
    pub fn nth_smallest(&self, k: usize) -> Option<&T> {
        k.checked_sub(1).and_then(|skip| self.iter().nth(skip))
    }

    /// Returns the `k`-th largest value, counting from 1.
    ///
    /// Walks the tree in reverse order, so only `k` values plus one path are
    /// visited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [8, 3, 10, 1, 6, 14].into_iter().collect();
    /// assert_eq!(tree.nth_largest(1), Some(&14));
    /// assert_eq!(tree.nth_largest(3), Some(&8));
    /// assert_eq!(tree.nth_largest(0), None);
    /// assert_eq!(tree.nth_largest(7), None);
    /// ```
    #[must_use]
    pub fn nth_largest(&self, k: usize) -> Option<&T> {
        k.checked_sub(1).and_then(|skip| self.iter().rev().nth(skip))
    }

    /// Returns the values of every node exactly `depth` edges below the
    /// root, left to right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [10, 5, 15, 3, 7].into_iter().collect();
    /// assert_eq!(tree.at_depth(0), vec![&10]);
    /// assert_eq!(tree.at_depth(1), vec![&5, &15]);
    /// assert_eq!(tree.at_depth(2), vec![&3, &7]);
    /// assert!(tree.at_depth(3).is_empty());
    /// ```
    #[must_use]
    pub fn at_depth(&self, depth: usize) -> Vec<&T> {
        let mut found = Vec::new();
        let mut pending: SmallVec<[(usize, usize); STACK_INLINE_CAPACITY]> = SmallVec::new();
        pending.extend(self.root.map(|root| (root, 0)));
        while let Some((index, level)) = pending.pop() {
            let node = &self.nodes[index];
            if level == depth {
                found.push(&node.value);
                continue;
            }
            pending.extend(node.right.map(|right| (right, level + 1)));
            pending.extend(node.left.map(|left| (left, level + 1)));
        }
        found
    }
}

impl<T, C: Comparator<T>> RedBlackTree<T, C> {
    /// Returns the values on the search path from the root down to the parent
    /// of the first node comparing equal to `value`.
    ///
    /// Returns `None` if no stored value compares equal, and an empty vector
    /// if the match is the root.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [10, 5, 15, 3, 7].into_iter().collect();
    /// assert_eq!(tree.ancestors(&7), Some(vec![&10, &5]));
    /// assert_eq!(tree.ancestors(&10), Some(vec![]));
    /// assert_eq!(tree.ancestors(&4), None);
    /// ```
    #[must_use]
    pub fn ancestors(&self, value: &T) -> Option<Vec<&T>> {
        let found = self.search(value)?;
        let mut path = Vec::new();
        let mut cursor = self.nodes[found].parent;
        while let Some(index) = cursor {
            path.push(&self.nodes[index].value);
            cursor = self.nodes[index].parent;
        }
        path.reverse();
        Some(path)
    }
}

fn push_spine<T>(stack: &mut NodeStack, nodes: &[Node<T>], mut cursor: Option<usize>, side: Side) {
    while let Some(index) = cursor {
        stack.push(index);
        cursor = nodes[index].child(side);
    }
}

// =============================================================================
// In-order Iterator
// =============================================================================

/// A sorted iterator over the values of a [`RedBlackTree`].
///
/// Created by [`RedBlackTree::iter`].
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    front: NodeStack,
    back: NodeStack,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], root: Option<usize>) -> Self {
        let mut iterator = Self {
            nodes,
            front: NodeStack::new(),
            back: NodeStack::new(),
            remaining: if root.is_some() { nodes.len() } else { 0 },
        };
        push_spine(&mut iterator.front, nodes, root, Side::Left);
        push_spine(&mut iterator.back, nodes, root, Side::Right);
        iterator
    }

    /// Advances from the smallest end, yielding an arena position.
    pub(crate) fn next_index(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front.pop()?;
        push_spine(&mut self.front, self.nodes, self.nodes[index].right, Side::Left);
        self.remaining -= 1;
        Some(index)
    }

    fn next_back_index(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back.pop()?;
        push_spine(&mut self.back, self.nodes, self.nodes[index].left, Side::Right);
        self.remaining -= 1;
        Some(index)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_index().map(|index| &self.nodes[index].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.next_back_index().map(|index| &self.nodes[index].value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Pre-order Iterator
// =============================================================================

/// A pre-order iterator over the values of a [`RedBlackTree`].
///
/// Created by [`RedBlackTree::pre_order`].
pub struct PreOrder<'a, T> {
    nodes: &'a [Node<T>],
    pending: NodeStack,
    remaining: usize,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], root: Option<usize>) -> Self {
        let mut pending = NodeStack::new();
        pending.extend(root);
        Self {
            nodes,
            pending,
            remaining: if root.is_some() { nodes.len() } else { 0 },
        }
    }

    pub(crate) fn next_index(&mut self) -> Option<usize> {
        let index = self.pending.pop()?;
        let node = &self.nodes[index];
        self.pending.extend(node.right);
        self.pending.extend(node.left);
        self.remaining = self.remaining.saturating_sub(1);
        Some(index)
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_index().map(|index| &self.nodes[index].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PreOrder<'_, T> {}

impl<T> FusedIterator for PreOrder<'_, T> {}

// =============================================================================
// Post-order Iterator
// =============================================================================

/// A post-order iterator over the values of a [`RedBlackTree`].
///
/// Created by [`RedBlackTree::post_order`].
pub struct PostOrder<'a, T> {
    nodes: &'a [Node<T>],
    /// Nodes with a flag telling whether their children are already queued.
    pending: SmallVec<[(usize, bool); STACK_INLINE_CAPACITY]>,
    remaining: usize,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], root: Option<usize>) -> Self {
        let mut pending = SmallVec::new();
        pending.extend(root.map(|root| (root, false)));
        Self {
            nodes,
            pending,
            remaining: if root.is_some() { nodes.len() } else { 0 },
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, expanded)) = self.pending.pop() {
            let node = &self.nodes[index];
            if expanded {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.value);
            }
            self.pending.push((index, true));
            self.pending.extend(node.right.map(|right| (right, false)));
            self.pending.extend(node.left.map(|left| (left, false)));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PostOrder<'_, T> {}

impl<T> FusedIterator for PostOrder<'_, T> {}

// =============================================================================
// Level-order Iterator
// =============================================================================

/// A breadth-first iterator over the values of a [`RedBlackTree`].
///
/// Created by [`RedBlackTree::level_order`].
pub struct LevelOrder<'a, T> {
    nodes: &'a [Node<T>],
    queue: VecDeque<usize>,
    remaining: usize,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], root: Option<usize>) -> Self {
        Self {
            nodes,
            queue: root.into_iter().collect(),
            remaining: if root.is_some() { nodes.len() } else { 0 },
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.queue.pop_front()?;
        let node = &self.nodes[index];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for LevelOrder<'_, T> {}

impl<T> FusedIterator for LevelOrder<'_, T> {}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning iterator over the values of a [`RedBlackTree`], in sorted order.
///
/// Created by the `IntoIterator` implementation of [`RedBlackTree`].
pub struct IntoIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T, C> IntoIterator for RedBlackTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let order: Vec<usize> = {
            let mut in_order = Iter::new(&self.nodes, self.root);
            std::iter::from_fn(|| in_order.next_index()).collect()
        };
        let mut slots: Vec<Option<T>> = self.nodes.into_iter().map(|node| Some(node.value)).collect();
        let values: Vec<T> = order
            .into_iter()
            .filter_map(|index| slots[index].take())
            .collect();
        IntoIter {
            values: values.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
