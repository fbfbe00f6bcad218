//! Diagnostic rendering of an [`OrderedMap`]'s tree structure.
//!
//! [`OrderedMap::tree_view`] renders one line per node in pre-order,
//! indented by depth, with `L`/`R` marking which link of its parent a node
//! hangs from. [`OrderedMap::dump`] sends that rendering to `tracing`.
//!
//! # Examples
//!
//! ```rust
//! use bstmap::ordered::OrderedMap;
//!
//! let map: OrderedMap<i32, &str> = [(2, "two"), (1, "one"), (3, "three")]
//!     .into_iter()
//!     .collect();
//!
//! assert_eq!(
//!     map.tree_view().to_string(),
//!     "2: two\n  L 1: one\n  R 3: three"
//! );
//! ```

use std::fmt;

use super::map::{Branch, OrderedMap};

/// Number of spaces added per level of depth.
const INDENT_WIDTH: usize = 2;

/// A [`Display`](fmt::Display) adapter that draws the shape of a map's
/// tree. Returned by [`OrderedMap::tree_view`].
pub struct TreeView<'a, K, V> {
    map: &'a OrderedMap<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Returns a view that renders the tree structure of this map.
    ///
    /// An empty map renders as `(empty)`.
    #[must_use]
    pub const fn tree_view(&self) -> TreeView<'_, K, V> {
        TreeView { map: self }
    }
}

impl<K: fmt::Display, V: fmt::Display> OrderedMap<K, V> {
    /// Emits the tree structure as a `debug` event on the `bstmap::dump`
    /// target.
    ///
    /// Nothing is written unless a `tracing` subscriber is installed and
    /// enabled for that target.
    pub fn dump(&self) {
        tracing::debug!(
            target: "bstmap::dump",
            len = self.len(),
            height = self.height(),
            "\n{}",
            self.tree_view()
        );
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for TreeView<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.map.is_empty() {
            return write!(formatter, "(empty)");
        }
        for (position, visit) in self.map.preorder_cursor().enumerate() {
            if position > 0 {
                writeln!(formatter)?;
            }
            let tag = match visit.branch {
                Branch::Root => "",
                Branch::Left => "L ",
                Branch::Right => "R ",
            };
            write!(
                formatter,
                "{:indent$}{tag}{key}: {value}",
                "",
                indent = visit.depth * INDENT_WIDTH,
                key = visit.node.key,
                value = visit.node.value,
            )?;
        }
        Ok(())
    }
}
