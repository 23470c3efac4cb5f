//! # redblack
//!
//! An ordered multiset backed by a red-black tree that rebalances on insert.
//!
//! ## Overview
//!
//! [`RedBlackTree`] keeps its values sorted by a configurable
//! [`Comparator`](comparator::Comparator) and stays balanced after every
//! insertion, bounding its height by `2 * log2(n + 1)`. It provides:
//!
//! - **Insertion**: chainable [`insert`](RedBlackTree::insert) with recoloring
//!   and rotation fix-up; equal values are kept in insertion order
//! - **Queries**: `get`, `contains`, `count`, `first`, `last`, `height`
//! - **Traversals**: in-order (double-ended), pre-order, post-order, level-order
//! - **Order statistics**: `nth_smallest`, `nth_largest`, `ancestors`, `at_depth`
//! - **Introspection**: read-only [`NodeRef`] handles and a full
//!   [`validate`](RedBlackTree::validate) check
//! - **Output**: a text [`render`](RedBlackTree::render)ing of the tree shape
//!
//! Nodes are never removed individually; [`clear`](RedBlackTree::clear) empties
//! the whole tree.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`RedBlackTree`] and [`Color`]
//!
//! ## Logging
//!
//! Fix-up steps and rotations are reported as `tracing` events at `trace`
//! level; a rotation that replaces the root is reported at `debug` level.
//! Install any `tracing` subscriber to see them.
//!
//! ## Example
//!
//! ```rust
//! use redblack::prelude::*;
//!
//! let mut tree = RedBlackTree::new();
//! tree.insert(10).insert(5).insert(7);
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.value(), &7);
//! assert_eq!(root.color(), Color::Black);
//! assert_eq!(tree.to_string(), "{5, 7, 10}");
//! assert!(tree.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use redblack::prelude::*;
///
/// let tree: RedBlackTree<i32> = [2, 1].into_iter().collect();
/// assert_eq!(tree.first(), Some(&1));
/// ```
pub mod prelude {
    pub use crate::comparator::{ByKey, CompareFn, Comparator, NaturalOrder, ReverseOrder};
    pub use crate::{Color, InvariantViolation, NodeId, NodeRef, RedBlackTree};
}

pub mod comparator;

mod iter;
mod node;
mod render;
mod tree;
mod validate;

pub use iter::{IntoIter, Iter, LevelOrder, PostOrder, PreOrder};
pub use node::{Color, NodeId, NodeRef};
pub use render::EMPTY_TREE;
pub use tree::RedBlackTree;
pub use validate::InvariantViolation;
