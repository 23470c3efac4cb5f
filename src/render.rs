//! Text output.
//!
//! [`RedBlackTree::render`] draws the tree shape as a block of text;
//! the [`Display`](fmt::Display) implementation prints the sorted values
//! as a set literal.

use std::fmt;

use smallvec::{SmallVec, smallvec};

use crate::tree::{RedBlackTree, STACK_INLINE_CAPACITY};

/// Placeholder rendered for a tree without nodes.
pub const EMPTY_TREE: &str = "Empty tree";

/// A node awaiting placement: arena position, depth, and the inclusive column
/// range its subtree may occupy.
type Placement = (usize, usize, usize, usize);

impl<T: fmt::Display, C> RedBlackTree<T, C> {
    /// Draws the tree level by level.
    ///
    /// The drawing is `2^(h + 1) - 1` columns wide for a tree of height `h`.
    /// Each node is printed at the middle column of the range it owns, and
    /// its children split that range in two. One line is produced per level,
    /// without trailing whitespace; an empty tree renders as `"Empty tree"`.
    ///
    /// Every column holds one value or one space, so values wider than one
    /// character push the rest of their line to the right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.render(), "   2\n 1   3");
    ///
    /// let empty: RedBlackTree<i32> = RedBlackTree::new();
    /// assert_eq!(empty.render(), "Empty tree");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let Some(root) = self.root else {
            return EMPTY_TREE.to_owned();
        };

        let height = self.height();
        let exponent = u32::try_from(height + 1).unwrap_or(u32::MAX);
        let width = 2usize.saturating_pow(exponent) - 1;

        let mut rows: Vec<Vec<(usize, String)>> = vec![Vec::new(); height];
        let mut pending: SmallVec<[Placement; STACK_INLINE_CAPACITY]> =
            smallvec![(root, 0, 0, width - 1)];
        while let Some((index, depth, start, end)) = pending.pop() {
            let node = &self.nodes[index];
            let middle = start + (end - start) / 2;
            rows[depth].push((middle, node.value.to_string()));
            if let Some(left) = node.left {
                pending.push((left, depth + 1, start, middle - 1));
            }
            if let Some(right) = node.right {
                pending.push((right, depth + 1, middle + 1, end));
            }
        }

        let lines: Vec<String> = rows.into_iter().map(render_row).collect();
        lines.join("\n")
    }
}

fn render_row(mut cells: Vec<(usize, String)>) -> String {
    cells.sort_unstable_by_key(|(column, _)| *column);
    let mut line = String::new();
    let mut next_column = 0;
    for (column, text) in cells {
        line.extend(std::iter::repeat_n(' ', column - next_column));
        line.push_str(&text);
        next_column = column + 1;
    }
    line
}

impl<T: fmt::Display, C> fmt::Display for RedBlackTree<T, C> {
    /// Formats the values in sorted order, e.g. `{1, 2, 3}`.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("{")?;
        for (position, value) in self.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{value}")?;
        }
        formatter.write_str("}")
    }
}

// =============================================================================
// Tests
// =============================================================================
