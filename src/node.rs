//! Arena nodes and read-only node handles.
//!
//! Every node of a [`RedBlackTree`](crate::RedBlackTree) lives in a `Vec`
//! owned by the tree. Child and parent links are optional positions in that
//! arena rather than pointers, so the parent back-reference needs neither
//! `unsafe` nor reference counting. Nodes are never removed individually,
//! which keeps every position stable for the lifetime of the tree.
//!
//! Callers never see [`Node`] itself. Introspection goes through
//! [`NodeRef`], a borrowed handle that can walk the structure but cannot
//! change a link or a color.

use std::fmt;

// =============================================================================
// Color Definition
// =============================================================================

/// The color of a red-black tree node.
///
/// The color carries no meaning for the stored value; it exists only for the
/// balancing algorithm.
///
/// # Examples
///
/// ```rust
/// use redblack::{Color, RedBlackTree};
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(10).insert(20);
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.color(), Color::Black);
/// assert_eq!(root.right().unwrap().color(), Color::Red);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Every node starts red when it is attached.
    Red,
    /// The root is always black.
    Black,
}

impl Color {
    /// Returns `true` for [`Color::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` for [`Color::Black`].
    #[inline]
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => formatter.write_str("red"),
            Self::Black => formatter.write_str("black"),
        }
    }
}

// =============================================================================
// NodeId Definition
// =============================================================================

/// The position of a node inside its tree's arena.
///
/// Positions are handed out in insertion order, so among values that compare
/// equal, a smaller id means an earlier insertion. Ids stay valid until the
/// tree is cleared.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena position.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

// =============================================================================
// Side Definition
// =============================================================================

/// A child slot of a node.
///
/// Also used as a rotation direction: rotating `Left` at a node moves that
/// node down into the left slot of its former right child.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// Internal arena record.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) parent: Option<usize>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<T> Node<T> {
    /// Creates a detached red node.
    pub(crate) const fn new(value: T) -> Self {
        Self {
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<usize>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

// =============================================================================
// NodeRef Definition
// =============================================================================

/// A read-only view of one node of a [`RedBlackTree`](crate::RedBlackTree).
///
/// Obtained from [`RedBlackTree::root`](crate::RedBlackTree::root) or
/// [`RedBlackTree::node`](crate::RedBlackTree::node). A `NodeRef` borrows the
/// tree, so the structure cannot change while it is alive.
///
/// # Examples
///
/// ```rust
/// use redblack::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(10).insert(5).insert(7);
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.value(), &7);
/// assert_eq!(root.left().map(|node| *node.value()), Some(5));
/// assert_eq!(root.right().map(|node| *node.value()), Some(10));
/// assert!(root.left().unwrap().parent().unwrap().is_root());
/// ```
pub struct NodeRef<'a, T> {
    nodes: &'a [Node<T>],
    index: usize,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) const fn new(nodes: &'a [Node<T>], index: usize) -> Self {
        Self { nodes, index }
    }

    #[inline]
    fn node(&self) -> &'a Node<T> {
        &self.nodes[self.index]
    }

    fn at(&self, index: Option<usize>) -> Option<Self> {
        index.map(|index| Self::new(self.nodes, index))
    }

    /// Returns the arena position of this node.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> NodeId {
        NodeId(self.index)
    }

    /// Returns the stored value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// Returns the node color.
    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.node().color
    }

    /// Returns `true` if the node is red.
    #[inline]
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    /// Returns `true` if the node is black.
    #[inline]
    #[must_use]
    pub fn is_black(&self) -> bool {
        self.color().is_black()
    }

    /// Returns the left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.at(self.node().left)
    }

    /// Returns the right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.at(self.node().right)
    }

    /// Returns the structural parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.at(self.node().parent)
    }

    /// Returns `true` if this node has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Returns `true` if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    /// Two handles are equal when they point at the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.index == other.index
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeRef")
            .field("id", &self.id())
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
