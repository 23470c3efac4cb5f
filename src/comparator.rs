//! Orderings a [`RedBlackTree`](crate::RedBlackTree) can be configured with.
//!
//! The tree never calls `Ord` directly. Every comparison goes through a
//! [`Comparator`], which defaults to [`NaturalOrder`]. Any total order works:
//!
//! - [`NaturalOrder`]: the value's own `Ord`
//! - [`ReverseOrder`]: the value's `Ord`, reversed
//! - [`CompareFn`]: a closure `Fn(&T, &T) -> Ordering`
//! - [`ByKey`]: a closure extracting an `Ord` key
//!
//! # Examples
//!
//! ```rust
//! use redblack::RedBlackTree;
//! use redblack::comparator::ReverseOrder;
//!
//! let mut tree = RedBlackTree::with_comparator(ReverseOrder);
//! tree.insert(1).insert(3).insert(2);
//!
//! let values: Vec<&i32> = tree.iter().collect();
//! assert_eq!(values, vec![&3, &2, &1]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// A total order over `T`.
///
/// Implementations must be consistent: antisymmetric, transitive, and
/// stable for the lifetime of the tree. An inconsistent comparator cannot
/// cause memory unsafety, but the tree may then fail to find values it holds.
pub trait Comparator<T: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

// =============================================================================
// NaturalOrder
// =============================================================================

/// Orders values by their own [`Ord`] implementation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

// =============================================================================
// ReverseOrder
// =============================================================================

/// Orders values by their [`Ord`] implementation, largest first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ReverseOrder;

impl<T: Ord + ?Sized> Comparator<T> for ReverseOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        right.cmp(left)
    }
}

// =============================================================================
// CompareFn
// =============================================================================

/// Adapts a closure `Fn(&T, &T) -> Ordering` into a [`Comparator`].
///
/// # Examples
///
/// ```rust
/// use redblack::comparator::{CompareFn, Comparator};
/// use std::cmp::Ordering;
///
/// let by_length = CompareFn::new(|left: &&str, right: &&str| left.len().cmp(&right.len()));
/// assert_eq!(by_length.compare(&"ab", &"abc"), Ordering::Less);
/// ```
#[derive(Clone, Copy)]
pub struct CompareFn<F> {
    function: F,
}

impl<F> CompareFn<F> {
    /// Wraps `function`.
    #[inline]
    #[must_use]
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<T: ?Sized, F> Comparator<T> for CompareFn<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.function)(left, right)
    }
}

impl<F> fmt::Debug for CompareFn<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("CompareFn(..)")
    }
}

// =============================================================================
// ByKey
// =============================================================================

/// Orders values by a key extracted with a closure.
///
/// Values whose keys are equal compare equal, so they are stored as
/// duplicates and keep their insertion order.
///
/// # Examples
///
/// ```rust
/// use redblack::RedBlackTree;
///
/// let mut tree = RedBlackTree::by_key(|entry: &(u8, char)| entry.0);
/// tree.insert((2, 'b')).insert((1, 'a')).insert((2, 'c'));
///
/// let values: Vec<char> = tree.iter().map(|entry| entry.1).collect();
/// assert_eq!(values, vec!['a', 'b', 'c']);
/// ```
pub struct ByKey<F, K> {
    extract: F,
    key: PhantomData<fn() -> K>,
}

impl<F, K> ByKey<F, K> {
    /// Wraps the key extractor `extract`.
    #[inline]
    #[must_use]
    pub const fn new(extract: F) -> Self {
        Self {
            extract,
            key: PhantomData,
        }
    }
}

impl<T: ?Sized, K: Ord, F> Comparator<T> for ByKey<F, K>
where
    F: Fn(&T) -> K,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.extract)(left).cmp(&(self.extract)(right))
    }
}

impl<F: Clone, K> Clone for ByKey<F, K> {
    fn clone(&self) -> Self {
        Self::new(self.extract.clone())
    }
}

impl<F, K> fmt::Debug for ByKey<F, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ByKey(..)")
    }
}

// =============================================================================
// Tests
// =============================================================================
