//! The red-black tree itself.
//!
//! # Overview
//!
//! [`RedBlackTree`] is an ordered multiset. Values are kept in comparator
//! order; equal values are all kept and stay in the order they were inserted.
//!
//! - O(log N) insert
//! - O(log N) get / contains / first / last
//! - O(1) len and `is_empty`
//!
//! # Internal Structure
//!
//! Nodes live in an arena (`Vec<Node<T>>`) and link to each other by arena
//! position. After every insert the tree satisfies:
//!
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. Red nodes have only black children
//! 4. Every path from a node to an empty slot below it crosses the same
//!    number of black nodes
//! 5. The in-order sequence is sorted, with equal values in insertion order
//!
//! Together these bound the height by `2 * log2(N + 1)`.

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;
use static_assertions::assert_impl_all;
use tracing::{debug, trace};

use crate::comparator::{ByKey, CompareFn, Comparator, NaturalOrder};
use crate::node::{Color, Node, NodeId, NodeRef, Side};

/// Inline capacity of the explicit stacks used by queries.
///
/// Enough for any tree of up to 2^32 values, given the height bound.
pub(crate) const STACK_INLINE_CAPACITY: usize = 64;

pub(crate) type NodeStack = SmallVec<[usize; STACK_INLINE_CAPACITY]>;

const ROTATION_PIVOT_PANIC_MESSAGE: &str =
    "rotation requires the node to have a child on the rising side";

const CHILD_LINK_PANIC_MESSAGE: &str = "parent link does not match a child slot of the parent";

// =============================================================================
// RedBlackTree Definition
// =============================================================================

/// An ordered multiset backed by a red-black tree.
///
/// Values are ordered by a [`Comparator`], `Ord` by default. Inserting a
/// value that compares equal to stored values adds another element after
/// them; nothing is ever replaced or merged.
///
/// The tree is mutated in place. [`insert`](Self::insert) returns
/// `&mut Self` so calls can be chained.
///
/// # Time Complexity
///
/// | Operation        | Complexity   |
/// |------------------|--------------|
/// | `new`            | O(1)         |
/// | `insert`         | O(log N)     |
/// | `get`/`contains` | O(log N)     |
/// | `count`          | O(log N + k) |
/// | `first`/`last`   | O(log N)     |
/// | `height`         | O(N)         |
/// | `len`            | O(1)         |
///
/// # Examples
///
/// ```rust
/// use redblack::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(10).insert(20).insert(30);
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.value(), &20);
/// assert!(root.is_black());
/// assert!(root.left().unwrap().is_red());
/// assert!(root.right().unwrap().is_red());
///
/// let values: Vec<&i32> = tree.iter().collect();
/// assert_eq!(values, vec![&10, &20, &30]);
/// ```
#[derive(Clone)]
pub struct RedBlackTree<T, C = NaturalOrder> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) root: Option<usize>,
    comparator: C,
}

assert_impl_all!(RedBlackTree<i32>: Send, Sync, Clone, Default);
assert_impl_all!(RedBlackTree<String>: Send, Sync);

impl<T> RedBlackTree<T, NaturalOrder> {
    /// Creates an empty tree ordered by `T`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty tree with room for `capacity` values before the
    /// arena reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
            comparator: NaturalOrder,
        }
    }
}

impl<T, F> RedBlackTree<T, CompareFn<F>>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty tree ordered by the closure `compare`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::by(|left: &i32, right: &i32| right.cmp(left));
    /// tree.insert(1).insert(2).insert(3);
    /// assert_eq!(tree.first(), Some(&3));
    /// ```
    #[must_use]
    pub const fn by(compare: F) -> Self {
        Self::with_comparator(CompareFn::new(compare))
    }
}

impl<T, F, K> RedBlackTree<T, ByKey<F, K>>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    /// Creates an empty tree ordered by the key `extract` returns.
    ///
    /// Values with equal keys are kept in insertion order.
    #[must_use]
    pub const fn by_key(extract: F) -> Self {
        Self::with_comparator(ByKey::new(extract))
    }
}

impl<T, C> RedBlackTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    /// use redblack::comparator::ReverseOrder;
    ///
    /// let mut tree = RedBlackTree::with_comparator(ReverseOrder);
    /// tree.insert("a").insert("c").insert("b");
    /// assert_eq!(tree.first(), Some(&"c"));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            comparator,
        }
    }

    /// Returns the comparator ordering this tree.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of stored values, duplicates included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a handle to the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|root| NodeRef::new(&self.nodes, root))
    }

    /// Returns a handle to the node with the given id, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(&self.nodes, id.0))
    }

    /// Returns the smallest value (the first of them, if duplicated).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.first(), Some(&1));
    /// assert_eq!(tree.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.root
            .map(|root| &self.nodes[self.extreme(root, Side::Left)].value)
    }

    /// Returns the largest value (the last of them, if duplicated).
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.root
            .map(|root| &self.nodes[self.extreme(root, Side::Right)].value)
    }

    /// Returns the number of nodes on the longest path from the root down to
    /// a leaf, `0` for an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = (1..=1000).collect();
    /// assert!(tree.height() as f64 <= 2.0 * 1001_f64.log2());
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: SmallVec<[(usize, usize); STACK_INLINE_CAPACITY]> = SmallVec::new();
        pending.extend(self.root.map(|root| (root, 1)));
        while let Some((index, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            let node = &self.nodes[index];
            pending.extend(node.left.map(|left| (left, depth + 1)));
            pending.extend(node.right.map(|right| (right, depth + 1)));
        }
        tallest
    }

    /// Returns the number of black nodes on any path from the root to an
    /// empty slot, `0` for an empty tree.
    ///
    /// All such paths agree once the tree is balanced, so the leftmost one
    /// is counted.
    #[must_use]
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.root;
        while let Some(index) = cursor {
            if self.nodes[index].color.is_black() {
                count += 1;
            }
            cursor = self.nodes[index].left;
        }
        count
    }

    /// Removes every value, keeping the arena's allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Follows `side` links from `index` as far as they go.
    pub(crate) fn extreme(&self, mut index: usize, side: Side) -> usize {
        while let Some(next) = self.nodes[index].child(side) {
            index = next;
        }
        index
    }

    /// Which slot of `parent` holds `child`.
    fn side_of(&self, child: usize, parent: usize) -> Side {
        if self.nodes[parent].left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(
                self.nodes[parent].right,
                Some(child),
                "{CHILD_LINK_PANIC_MESSAGE}"
            );
            Side::Right
        }
    }

    #[inline]
    fn is_red(&self, index: usize) -> bool {
        self.nodes[index].color.is_red()
    }

    // =========================================================================
    // Rotations
    // =========================================================================

    /// Rotates the subtree at `top` to the left.
    ///
    /// The right child of `top` takes its place, `top` becomes that child's
    /// left child, and the child's former left subtree moves under `top` on
    /// the right. The in-order sequence is unchanged; colors are untouched.
    #[cfg(test)]
    pub(crate) fn rotate_left(&mut self, top: usize) {
        self.rotate(top, Side::Left);
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    #[cfg(test)]
    pub(crate) fn rotate_right(&mut self, top: usize) {
        self.rotate(top, Side::Right);
    }

    /// Moves `top` down into its `direction` slot under the child that
    /// rises from the opposite side.
    ///
    /// Rewrites four link pairs: `top`/inner subtree, rising/`top`,
    /// rising/former parent of `top` (or the tree root).
    fn rotate(&mut self, top: usize, direction: Side) {
        let rising = self.nodes[top].child(direction.opposite());
        debug_assert!(rising.is_some(), "{ROTATION_PIVOT_PANIC_MESSAGE}");
        let Some(rising) = rising else {
            return;
        };
        let inner = self.nodes[rising].child(direction);
        let above = self.nodes[top].parent;

        self.nodes[top].set_child(direction.opposite(), inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(top);
        }

        self.nodes[rising].parent = above;
        match above {
            Some(above) => {
                let slot = self.side_of(top, above);
                self.nodes[above].set_child(slot, Some(rising));
            }
            None => {
                self.root = Some(rising);
                debug!(root = rising, "rotation installed a new root");
            }
        }

        self.nodes[rising].set_child(direction, Some(top));
        self.nodes[top].parent = Some(rising);

        trace!(?direction, top, rising, "rotated");
    }
}

impl<T, C: Comparator<T>> RedBlackTree<T, C> {
    /// Inserts `value` and rebalances the tree.
    ///
    /// Values comparing equal to stored ones are added after them, so the
    /// length always grows by one.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(10).insert(5).insert(15).insert(3).insert(7);
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.value(), &10);
    /// assert!(root.left().unwrap().is_black());
    /// assert!(root.right().unwrap().is_black());
    ///
    /// tree.insert(7);
    /// assert_eq!(tree.count(&7), 2);
    /// assert_eq!(tree.len(), 6);
    /// ```
    pub fn insert(&mut self, value: T) -> &mut Self {
        let inserted = self.attach_leaf(value);
        if self.nodes[inserted].parent.is_some() {
            self.rebalance_after_insert(inserted);
        }
        self
    }

    /// Places `value` in a new leaf by ordered descent, without rebalancing.
    ///
    /// The first node of an empty tree becomes a black root; every other node
    /// is attached red. Returns the arena position of the new node.
    pub(crate) fn attach_leaf(&mut self, value: T) -> usize {
        let index = self.nodes.len();
        let Some(mut current) = self.root else {
            let mut node = Node::new(value);
            node.color = Color::Black;
            self.nodes.push(node);
            self.root = Some(index);
            return index;
        };

        loop {
            let side = match self.comparator.compare(&value, &self.nodes[current].value) {
                Ordering::Less => Side::Left,
                Ordering::Equal | Ordering::Greater => Side::Right,
            };
            match self.nodes[current].child(side) {
                Some(next) => current = next,
                None => {
                    let mut node = Node::new(value);
                    node.parent = Some(current);
                    self.nodes.push(node);
                    self.nodes[current].set_child(side, Some(index));
                    return index;
                }
            }
        }
    }

    /// Restores the color invariants after `inserted` was attached red.
    ///
    /// On entry the only possible violation is a red `inserted` under a red
    /// parent. Each pass either recolors and moves the violation two levels
    /// up, or rotates and finishes.
    fn rebalance_after_insert(&mut self, inserted: usize) {
        let mut current = inserted;

        while let Some(parent) = self.nodes[current].parent
            && self.is_red(parent)
        {
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            let parent_side = self.side_of(parent, grandparent);
            let uncle = self.nodes[grandparent].child(parent_side.opposite());

            if let Some(uncle) = uncle
                && self.is_red(uncle)
            {
                trace!(node = current, parent, uncle, grandparent, "red uncle: recoloring");
                self.nodes[parent].color = Color::Black;
                self.nodes[uncle].color = Color::Black;
                self.nodes[grandparent].color = Color::Red;
                current = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.side_of(current, parent) != parent_side {
                trace!(node = current, parent, grandparent, "triangle: straightening");
                self.rotate(parent, parent_side);
                std::mem::swap(&mut current, &mut parent);
            }

            trace!(node = current, parent, grandparent, "line: rotating grandparent");
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate(grandparent, parent_side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }

        if let Some(parent) = self.nodes[current].parent {
            debug_assert!(
                !(self.is_red(current) && self.is_red(parent)),
                "red node {current} left under red parent {parent} after rebalancing"
            );
        }
    }

    /// Returns the arena position of the first node comparing equal to
    /// `value` on the search path.
    pub(crate) fn search(&self, value: &T) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(index) = cursor {
            cursor = match self.comparator.compare(value, &self.nodes[index].value) {
                Ordering::Less => self.nodes[index].left,
                Ordering::Greater => self.nodes[index].right,
                Ordering::Equal => return Some(index),
            };
        }
        None
    }

    /// Returns a stored value comparing equal to `value`.
    ///
    /// With duplicates, whichever equal value the search path meets first is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::by_key(|entry: &(u32, char)| entry.0);
    /// tree.insert((1, 'a')).insert((2, 'b'));
    ///
    /// assert_eq!(tree.get(&(2, '?')), Some(&(2, 'b')));
    /// assert_eq!(tree.get(&(3, '?')), None);
    /// ```
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.search(value).map(|index| &self.nodes[index].value)
    }

    /// Returns `true` if some stored value compares equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Returns how many stored values compare equal to `value`.
    ///
    /// Rotations can place equal values on both sides of each other, so both
    /// subtrees of every equal node are searched.
    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        let mut matches = 0;
        let mut pending = NodeStack::new();
        pending.extend(self.root);
        while let Some(index) = pending.pop() {
            let node = &self.nodes[index];
            match self.comparator.compare(value, &node.value) {
                Ordering::Less => pending.extend(node.left),
                Ordering::Greater => pending.extend(node.right),
                Ordering::Equal => {
                    matches += 1;
                    pending.extend(node.left);
                    pending.extend(node.right);
                }
            }
        }
        matches
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Default> Default for RedBlackTree<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for RedBlackTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.nodes.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialEq, C> PartialEq for RedBlackTree<T, C> {
    /// Two trees are equal when they hold equal values in the same order.
    /// Shapes and colors are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for RedBlackTree<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for RedBlackTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, C> serde::Serialize for RedBlackTree<T, C>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct RedBlackTreeVisitor<T, C> {
    marker: std::marker::PhantomData<(T, C)>,
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for RedBlackTreeVisitor<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = RedBlackTree<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // Sequential insert keeps memory growth proportional to the input.
        let mut tree = RedBlackTree::default();
        while let Some(value) = access.next_element()? {
            tree.insert(value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for RedBlackTree<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackTreeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
