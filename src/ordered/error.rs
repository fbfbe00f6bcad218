//! Error types for [`OrderedMap`](super::OrderedMap).
//!
//! The map reports failure through `bool` and `Option` results. The `try_*`
//! methods wrap those results in [`OrderedMapError`] so that callers can
//! propagate failures with `?`. A failed operation never modifies the map.

/// Represents a rejected [`OrderedMap`](super::OrderedMap) operation.
///
/// # Examples
///
/// ```rust
/// use bstmap::ordered::{OrderedMap, OrderedMapError};
///
/// let mut map: OrderedMap = OrderedMap::new();
/// map.insert("x".to_string(), 1.0);
///
/// let error = map.try_insert("x".to_string(), 2.0).unwrap_err();
/// assert_eq!(error, OrderedMapError::DuplicateKey);
/// assert_eq!(format!("{error}"), "key is already present in the map");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderedMapError {
    /// `insert` was given a key that is already present.
    DuplicateKey,
    /// `update` or `erase` was given a key that is not present.
    KeyNotFound,
    /// A positional lookup was outside `0..length`.
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// The number of entries in the map at the time of the lookup.
        length: usize,
    },
}

impl std::fmt::Display for OrderedMapError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey => write!(formatter, "key is already present in the map"),
            Self::KeyNotFound => write!(formatter, "key is not present in the map"),
            Self::IndexOutOfBounds { index, length } => write!(
                formatter,
                "index {index} is out of bounds for a map of {length} entries"
            ),
        }
    }
}

impl std::error::Error for OrderedMapError {}
