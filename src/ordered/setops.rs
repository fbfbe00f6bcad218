//! Set-style operations over two [`OrderedMap`]s.
//!
//! [`combine`] merges two maps and drops every key on which they disagree;
//! [`subtract`] removes the keys of one map from another. Both are written
//! purely against the public `OrderedMap` API and never modify their inputs.
//!
//! The second map is walked in pre-order, the same order as
//! [`OrderedMap::get_index`] over `0..len()`.

use super::map::OrderedMap;

/// Merges `first` and `second` into a new map.
///
/// The result starts as a copy of `first`. Every entry of `second` whose key
/// is absent from the result is added; an entry whose key is present with an
/// equal value is left alone; an entry whose key is present with a different
/// value causes that key to be removed from the result.
///
/// Returns the merged map and `true` when every key shared by both maps
/// carried an equal value. Values are compared with `==` and no tolerance.
///
/// # Examples
///
/// ```rust
/// use bstmap::ordered::{OrderedMap, combine};
///
/// let first: OrderedMap = [("x".to_string(), 1.0), ("y".to_string(), 2.0)]
///     .into_iter()
///     .collect();
/// let second: OrderedMap = [("y".to_string(), 2.0), ("z".to_string(), 3.0)]
///     .into_iter()
///     .collect();
///
/// let (result, agreed) = combine(&first, &second);
/// assert!(agreed);
/// assert_eq!(result.len(), 3);
///
/// let conflicting: OrderedMap = [("x".to_string(), 9.0)].into_iter().collect();
/// let (result, agreed) = combine(&first, &conflicting);
/// assert!(!agreed);
/// assert!(!result.contains("x"));
/// ```
#[must_use]
pub fn combine<K, V>(first: &OrderedMap<K, V>, second: &OrderedMap<K, V>) -> (OrderedMap<K, V>, bool)
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let mut result = OrderedMap::new();
    let agreed = combine_into(first, second, &mut result);
    (result, agreed)
}

/// Like [`combine`], but writes into an existing map.
///
/// Whatever `result` held before is discarded: it is first assigned a copy
/// of `first`.
pub fn combine_into<K, V>(
    first: &OrderedMap<K, V>,
    second: &OrderedMap<K, V>,
    result: &mut OrderedMap<K, V>,
) -> bool
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    result.clone_from(first);

    let mut inserted = 0_usize;
    let mut conflicts = 0_usize;
    for (key, value) in second.iter_preorder() {
        match result.get(key) {
            None => {
                result.insert(key.clone(), value.clone());
                inserted += 1;
            }
            Some(existing) if existing == value => {}
            Some(_) => {
                result.erase(key);
                conflicts += 1;
            }
        }
    }

    tracing::debug!(inserted, conflicts, length = result.len(), "combined maps");
    conflicts == 0
}

/// Returns the entries of `first` whose keys are not in `second`.
///
/// Values in `second` are ignored; surviving entries keep their values from
/// `first`.
///
/// # Examples
///
/// ```rust
/// use bstmap::ordered::{OrderedMap, subtract};
///
/// let first: OrderedMap = [("x".to_string(), 1.0), ("y".to_string(), 2.0)]
///     .into_iter()
///     .collect();
/// let second: OrderedMap = [("y".to_string(), 0.0)].into_iter().collect();
///
/// let result = subtract(&first, &second);
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.get("x"), Some(&1.0));
/// ```
#[must_use]
pub fn subtract<K, V>(first: &OrderedMap<K, V>, second: &OrderedMap<K, V>) -> OrderedMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut result = OrderedMap::new();
    subtract_into(first, second, &mut result);
    result
}

/// Like [`subtract`], but writes into an existing map.
///
/// Whatever `result` held before is discarded: it is first assigned a copy
/// of `first`.
pub fn subtract_into<K, V>(
    first: &OrderedMap<K, V>,
    second: &OrderedMap<K, V>,
    result: &mut OrderedMap<K, V>,
) where
    K: Ord + Clone,
    V: Clone,
{
    result.clone_from(first);

    let mut removed = 0_usize;
    for (key, _) in second.iter_preorder() {
        if result.erase(key) {
            removed += 1;
        }
    }

    tracing::debug!(removed, length = result.len(), "subtracted maps");
}
