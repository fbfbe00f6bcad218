//! # bstmap
//!
//! An in-memory ordered map built on an unbalanced binary search tree,
//! with set-style operations for merging two maps.
//!
//! ## Overview
//!
//! - **`OrderedMap`**: unique keys mapped to values (by default `String` to
//!   `f64`), with point lookup, positional (pre-order) lookup, insert,
//!   update, erase, deep copy and constant-time swap
//! - **Set operations**: `combine` (union that drops conflicting keys) and
//!   `subtract` (key difference)
//!
//! The tree is never rebalanced; its height depends on insertion order. All
//! tree algorithms run iteratively, so degenerate trees do not exhaust the
//! call stack.
//!
//! ## Feature Flags
//!
//! - `setops`: `combine` and `subtract` (enabled by default)
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! Diagnostic events are emitted through [`tracing`]. The library never
//! installs a subscriber.
//!
//! ## Example
//!
//! ```rust
//! use bstmap::prelude::*;
//!
//! let mut map: OrderedMap = OrderedMap::new();
//! map.insert("answer".to_string(), 42.0);
//! assert_eq!(map.get("answer"), Some(&42.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use bstmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ordered::*;
}

pub mod ordered;
