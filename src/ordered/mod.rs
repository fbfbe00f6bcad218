//! Ordered map on an unbalanced binary search tree.
//!
//! This module provides:
//!
//! - [`OrderedMap`]: a mutable map from unique keys to values, stored in a
//!   binary search tree that is never rebalanced
//! - [`combine`] / [`subtract`]: set-style operations over two maps
//!   (behind the `setops` feature)
//! - [`OrderedMapError`]: the error returned by the `try_*` methods
//! - [`TreeView`]: a `Display` rendering of the tree structure
//!
//! # Ownership
//!
//! Every node is owned by exactly one parent link, and every tree by exactly
//! one map. Cloning a map copies every node, so a clone and its source never
//! share state.
//!
//! # Examples
//!
//! ## Point and positional access
//!
//! ```rust
//! use bstmap::ordered::OrderedMap;
//!
//! let mut map: OrderedMap = OrderedMap::new();
//! map.insert("beta".to_string(), 2.0);
//! map.insert("alpha".to_string(), 1.0);
//! map.insert("gamma".to_string(), 3.0);
//!
//! assert_eq!(map.get("alpha"), Some(&1.0));
//! assert!(map.contains("gamma"));
//!
//! // Positions follow a pre-order walk of the tree
//! for index in 0..map.len() {
//!     let (key, value) = map.get_index(index).unwrap();
//!     assert_eq!(map.get(key.as_str()), Some(value));
//! }
//! ```
//!
//! ## Independent copies
//!
//! ```rust
//! use bstmap::ordered::OrderedMap;
//!
//! let mut original: OrderedMap = OrderedMap::new();
//! original.insert("x".to_string(), 1.0);
//!
//! let mut copy = original.clone();
//! copy.update("x", 100.0);
//! copy.insert("y".to_string(), 2.0);
//!
//! assert_eq!(original.get("x"), Some(&1.0)); // Original unchanged
//! assert_eq!(original.len(), 1);
//! ```
//!
//! ## Combining maps
//!
//! ```rust
//! # #[cfg(feature = "setops")]
//! # {
//! use bstmap::ordered::{OrderedMap, combine, subtract};
//!
//! let first: OrderedMap = [("x".to_string(), 1.0), ("y".to_string(), 2.0)]
//!     .into_iter()
//!     .collect();
//! let second: OrderedMap = [("y".to_string(), 2.0), ("z".to_string(), 3.0)]
//!     .into_iter()
//!     .collect();
//!
//! let (union, agreed) = combine(&first, &second);
//! assert!(agreed);
//! assert_eq!(union.len(), 3);
//!
//! let difference = subtract(&first, &second);
//! assert_eq!(difference.len(), 1);
//! assert!(difference.contains("x"));
//! # }
//! ```

mod dump;
mod error;
mod map;
#[cfg(feature = "setops")]
mod setops;

pub use dump::TreeView;
pub use error::OrderedMapError;
pub use map::OrderedMap;
pub use map::OrderedMapIntoIterator;
pub use map::OrderedMapIterator;
pub use map::OrderedMapPreorderIterator;
#[cfg(feature = "setops")]
pub use setops::{combine, combine_into, subtract, subtract_into};
