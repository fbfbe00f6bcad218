//! Ordered map based on an unbalanced binary search tree.
//!
//! This module provides [`OrderedMap`], a mutable ordered map whose entries
//! live in a plain binary search tree. Each node exclusively owns its two
//! subtrees; there is no sharing between maps and no rebalancing.
//!
//! # Overview
//!
//! - O(h) get, contains, insert, update, erase (h is the tree height)
//! - O(n) positional lookup with [`OrderedMap::get_index`]
//! - O(1) len and `is_empty`
//! - O(n) clone (a deep, structurally identical copy)
//! - O(1) swap
//!
//! Because the tree is never rebalanced, inserting keys in sorted order
//! produces a tree of height n. Every algorithm here is written as a loop or
//! with an explicit work stack, so such degenerate trees are handled without
//! deep recursion.
//!
//! # Positional Order
//!
//! [`OrderedMap::get_index`] and [`OrderedMap::iter_preorder`] number the
//! entries by a pre-order walk: a node, then its whole left subtree, then its
//! whole right subtree. Positions are only meaningful while the map is not
//! mutated.
//!
//! # Examples
//!
//! ```rust
//! use bstmap::ordered::OrderedMap;
//!
//! let mut map: OrderedMap = OrderedMap::new();
//! map.insert("m".to_string(), 1.0);
//! map.insert("c".to_string(), 2.0);
//! map.insert("x".to_string(), 3.0);
//!
//! // Ascending key order
//! let keys: Vec<&String> = map.keys().collect();
//! assert_eq!(keys, vec!["c", "m", "x"]);
//!
//! // Pre-order positions: root first
//! assert_eq!(map.get_index(0), Some((&"m".to_string(), &1.0)));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use super::error::OrderedMapError;

// =============================================================================
// Node Definition
// =============================================================================

type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node structure of the search tree.
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a node with no children.
    const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Copies the key and value of this node, without its children.
    fn detached_copy(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::new(self.key.clone(), self.value.clone())
    }
}

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// An ordered map backed by an unbalanced binary search tree.
///
/// The default type parameters give a map from `String` keys to `f64`
/// values. Keys must implement `Ord` for every operation that searches the
/// tree; no two entries share a key.
///
/// Cloning produces a fully independent copy: mutating the clone never
/// affects the original.
///
/// # Time Complexity
///
/// | Operation          | Complexity |
/// |--------------------|------------|
/// | `new`              | O(1)       |
/// | `get`/`contains`   | O(h)       |
/// | `insert`/`update`  | O(h)       |
/// | `erase`            | O(h)       |
/// | `get_index`        | O(n)       |
/// | `len`/`is_empty`   | O(1)       |
/// | `swap`             | O(1)       |
/// | `clone`            | O(n)       |
///
/// # Examples
///
/// ```rust
/// use bstmap::ordered::OrderedMap;
///
/// let mut map: OrderedMap = OrderedMap::new();
/// assert!(map.insert("ratio".to_string(), 2.5));
/// assert!(!map.insert("ratio".to_string(), 3.0)); // duplicate key rejected
///
/// assert_eq!(map.get("ratio"), Some(&2.5));
/// assert!(map.update("ratio", 2.75));
/// assert_eq!(map.get("ratio"), Some(&2.75));
///
/// assert!(map.erase("ratio"));
/// assert!(map.is_empty());
/// ```
pub struct OrderedMap<K = String, V = f64> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

static_assertions::assert_impl_all!(OrderedMap: Clone, Default, Send, Sync);

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let map: OrderedMap = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Exchanges the contents of this map with `other`.
    ///
    /// Only the roots are exchanged; no node is copied or moved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let mut first: OrderedMap = [("a".to_string(), 1.0)].into_iter().collect();
    /// let mut second: OrderedMap = OrderedMap::new();
    ///
    /// first.swap(&mut second);
    /// assert!(first.is_empty());
    /// assert_eq!(second.get("a"), Some(&1.0));
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.root, &mut other.root);
        std::mem::swap(&mut self.length, &mut other.length);
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty map has height 0 and a single entry has height 1. The tree
    /// is never rebalanced, so inserting keys in sorted order yields a
    /// height equal to the length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let sorted: OrderedMap<i32, i32> = (0..5).map(|key| (key, key)).collect();
    /// assert_eq!(sorted.height(), 5);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.preorder_cursor()
            .map(|visit| visit.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the entry at position `index` in pre-order.
    ///
    /// Position 0 is the root; a node's left subtree is numbered before its
    /// right subtree. Returns `None` when `index >= len()`.
    ///
    /// # Complexity
    ///
    /// O(index)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let mut map: OrderedMap = OrderedMap::new();
    /// map.insert("b".to_string(), 2.0);
    /// map.insert("c".to_string(), 3.0);
    /// map.insert("a".to_string(), 1.0);
    ///
    /// assert_eq!(map.get_index(0), Some((&"b".to_string(), &2.0)));
    /// assert_eq!(map.get_index(1), Some((&"a".to_string(), &1.0)));
    /// assert_eq!(map.get_index(2), Some((&"c".to_string(), &3.0)));
    /// assert_eq!(map.get_index(3), None);
    /// ```
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        if index >= self.length {
            return None;
        }
        self.iter_preorder().nth(index)
    }

    /// Like [`get_index`](Self::get_index), but reports an out-of-range
    /// position as an error.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedMapError::IndexOutOfBounds`] when `index >= len()`.
    pub fn try_get_index(&self, index: usize) -> Result<(&K, &V), OrderedMapError> {
        self.get_index(index)
            .ok_or(OrderedMapError::IndexOutOfBounds {
                index,
                length: self.length,
            })
    }

    /// Returns the entry with the minimum key.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the maximum key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(2, "two"), (1, "one"), (3, "three")]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"one"), (&2, &"two"), (&3, &"three")]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> OrderedMapIterator<'_, K, V> {
        OrderedMapIterator::new(self.root.as_deref(), self.length)
    }

    /// Returns an iterator over entries in pre-order, the order used by
    /// [`get_index`](Self::get_index).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let map: OrderedMap<i32, ()> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    ///
    /// let keys: Vec<&i32> = map.iter_preorder().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&2, &1, &3]);
    /// ```
    #[must_use]
    pub fn iter_preorder(&self) -> OrderedMapPreorderIterator<'_, K, V> {
        OrderedMapPreorderIterator {
            cursor: self.preorder_cursor(),
            remaining: self.length,
        }
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Walks the tree in pre-order, reporting each node's depth and branch.
    pub(super) fn preorder_cursor(&self) -> PreorderCursor<'_, K, V> {
        PreorderCursor {
            stack: self
                .root
                .as_deref()
                .map(|node| Visit {
                    node,
                    depth: 0,
                    branch: Branch::Root,
                })
                .into_iter()
                .collect(),
        }
    }

    /// Unlinks the minimum node of the subtree in `slot` and returns its
    /// entry. The node's right child takes its place.
    fn detach_minimum(mut slot: &mut Link<K, V>) -> Option<(K, V)> {
        while slot.as_ref().is_some_and(|node| node.left.is_some()) {
            if let Some(node) = slot {
                slot = &mut node.left;
            }
        }
        let node = slot.take()?;
        let Node {
            key, value, right, ..
        } = *node;
        *slot = right;
        Some((key, value))
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let mut map: OrderedMap = OrderedMap::new();
    /// map.insert("hello".to_string(), 42.0);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42.0));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| &node.value)
    }

    /// Returns `true` if the map contains an entry for the key.
    ///
    /// # Complexity
    ///
    /// O(h)
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Adds a new entry to the map.
    ///
    /// Returns `false` and leaves the map unchanged when the key is already
    /// present. Otherwise the entry becomes a new leaf and `true` is
    /// returned.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let mut map: OrderedMap = OrderedMap::new();
    /// assert!(map.insert("x".to_string(), 1.0));
    /// assert!(!map.insert("x".to_string(), 2.0));
    /// assert_eq!(map.get("x"), Some(&1.0));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let slot = Self::locate_mut(&mut self.root, &key);
        if slot.is_some() {
            return false;
        }
        *slot = Some(Box::new(Node::new(key, value)));
        self.length += 1;
        true
    }

    /// Replaces the value of an existing entry.
    ///
    /// Returns `false` and leaves the map unchanged when the key is absent.
    /// The shape of the tree is never changed.
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn update<Q>(&mut self, key: &Q, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match Self::locate_mut(&mut self.root, key) {
            Some(node) => {
                node.value = value;
                true
            }
            None => false,
        }
    }

    /// Updates the entry if the key is present, inserts it otherwise.
    ///
    /// Always returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let mut map: OrderedMap = OrderedMap::new();
    /// assert!(map.insert_or_update("x".to_string(), 1.0));
    /// assert!(map.insert_or_update("x".to_string(), 2.0));
    /// assert_eq!(map.get("x"), Some(&2.0));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert_or_update(&mut self, key: K, value: V) -> bool {
        let slot = Self::locate_mut(&mut self.root, &key);
        match slot {
            Some(node) => node.value = value,
            None => {
                *slot = Some(Box::new(Node::new(key, value)));
                self.length += 1;
            }
        }
        true
    }

    /// Removes the entry for the key.
    ///
    /// Returns `false` and leaves the map unchanged when the key is absent.
    ///
    /// A node with two children is not unlinked itself: it takes over the
    /// key and value of its in-order successor (the minimum of its right
    /// subtree), and the successor is unlinked instead.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::ordered::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = [(2, 20), (1, 10), (3, 30)].into_iter().collect();
    /// assert!(map.erase(&2));
    /// assert!(!map.erase(&2));
    ///
    /// let keys: Vec<&i32> = map.keys().collect();
    /// assert_eq!(keys, vec![&1, &3]);
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let slot = Self::locate_mut(&mut self.root, key);
        let Some(mut node) = slot.take() else {
            return false;
        };

        *slot = match (node.left.take(), node.right.take()) {
            (None, None) => {
                tracing::trace!(case = "leaf", "erased entry");
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                tracing::trace!(case = "one_child", "erased entry");
                Some(child)
            }
            (Some(left), Some(right)) => {
                tracing::trace!(case = "two_children", "erased entry");
                node.left = Some(left);
                node.right = Some(right);
                if let Some((successor_key, successor_value)) =
                    Self::detach_minimum(&mut node.right)
                {
                    node.key = successor_key;
                    node.value = successor_value;
                }
                Some(node)
            }
        };
        self.length -= 1;
        true
    }

    /// Like [`insert`](Self::insert), but reports a duplicate key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedMapError::DuplicateKey`] when the key is present.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), OrderedMapError> {
        if self.insert(key, value) {
            Ok(())
        } else {
            Err(OrderedMapError::DuplicateKey)
        }
    }

    /// Like [`update`](Self::update), but reports a missing key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedMapError::KeyNotFound`] when the key is absent.
    pub fn try_update<Q>(&mut self, key: &Q, value: V) -> Result<(), OrderedMapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.update(key, value) {
            Ok(())
        } else {
            Err(OrderedMapError::KeyNotFound)
        }
    }

    /// Like [`erase`](Self::erase), but reports a missing key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`OrderedMapError::KeyNotFound`] when the key is absent.
    pub fn try_erase<Q>(&mut self, key: &Q) -> Result<(), OrderedMapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.erase(key) {
            Ok(())
        } else {
            Err(OrderedMapError::KeyNotFound)
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Descends from `slot` to the link that holds `key`, or to the empty
    /// link where `key` would be attached.
    fn locate_mut<'a, Q>(mut slot: &'a mut Link<K, V>, key: &Q) -> &'a mut Link<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        loop {
            let ordering = match slot.as_deref() {
                Some(node) => key.cmp(node.key.borrow()),
                None => return slot,
            };
            if ordering == Ordering::Equal {
                return slot;
            }
            if let Some(node) = slot {
                slot = if ordering == Ordering::Less {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
        }
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Which link of its parent a node hangs from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Branch {
    Root,
    Left,
    Right,
}

/// A node reached by [`PreorderCursor`].
pub(super) struct Visit<'a, K, V> {
    pub(super) node: &'a Node<K, V>,
    pub(super) depth: usize,
    pub(super) branch: Branch,
}

/// Pre-order walk with an explicit stack.
pub(super) struct PreorderCursor<'a, K, V> {
    stack: Vec<Visit<'a, K, V>>,
}

impl<'a, K, V> Iterator for PreorderCursor<'a, K, V> {
    type Item = Visit<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        let depth = visit.depth + 1;
        // Right goes first so that the left subtree is popped next.
        if let Some(right) = visit.node.right.as_deref() {
            self.stack.push(Visit {
                node: right,
                depth,
                branch: Branch::Right,
            });
        }
        if let Some(left) = visit.node.left.as_deref() {
            self.stack.push(Visit {
                node: left,
                depth,
                branch: Branch::Left,
            });
        }
        Some(visit)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over key-value pairs of an [`OrderedMap`] in ascending key
/// order.
pub struct OrderedMapIterator<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> OrderedMapIterator<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, length: usize) -> Self {
        let mut iterator = Self {
            stack: Vec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for OrderedMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for OrderedMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An iterator over key-value pairs of an [`OrderedMap`] in pre-order.
pub struct OrderedMapPreorderIterator<'a, K, V> {
    cursor: PreorderCursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for OrderedMapPreorderIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.cursor.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&visit.node.key, &visit.node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for OrderedMapPreorderIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An owning iterator over key-value pairs of an [`OrderedMap`] in
/// ascending key order.
pub struct OrderedMapIntoIterator<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> OrderedMapIntoIterator<K, V> {
    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for OrderedMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node {
            key, value, right, ..
        } = *node;
        self.push_left_spine(right);
        self.remaining = self.remaining.saturating_sub(1);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for OrderedMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> Drop for OrderedMapIntoIterator<K, V> {
    fn drop(&mut self) {
        release_iteratively(std::mem::take(&mut self.stack));
    }
}

/// Frees a set of subtrees without recursing: every node has its children
/// detached before it is released.
fn release_iteratively<K, V>(mut pending: Vec<Box<Node<K, V>>>) {
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        release_iteratively(self.root.take().into_iter().collect());
    }
}

impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
    /// Produces a deep copy with the same shape as `self` and no shared
    /// nodes.
    fn clone(&self) -> Self {
        let mut root = self
            .root
            .as_deref()
            .map(|node| Box::new(node.detached_copy()));

        let mut pending: Vec<(&Node<K, V>, &mut Node<K, V>)> = Vec::new();
        if let (Some(source), Some(target)) = (self.root.as_deref(), root.as_deref_mut()) {
            pending.push((source, target));
        }
        while let Some((source, target)) = pending.pop() {
            target.left = source
                .left
                .as_deref()
                .map(|child| Box::new(child.detached_copy()));
            target.right = source
                .right
                .as_deref()
                .map(|child| Box::new(child.detached_copy()));

            if let (Some(source_left), Some(target_left)) =
                (source.left.as_deref(), target.left.as_deref_mut())
            {
                pending.push((source_left, target_left));
            }
            if let (Some(source_right), Some(target_right)) =
                (source.right.as_deref(), target.right.as_deref_mut())
            {
                pending.push((source_right, target_right));
            }
        }

        Self {
            root,
            length: self.length,
        }
    }

    /// Copy-and-swap: the copy is completed before `self` is touched, and
    /// the previous contents are released with the temporary.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_or_update(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = OrderedMapIntoIterator<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut iterator = OrderedMapIntoIterator {
            stack: Vec::new(),
            remaining: self.length,
        };
        iterator.push_left_spine(self.root.take());
        iterator
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = OrderedMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    /// Two maps are equal when they hold the same entries. Tree shape is
    /// not compared.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| left == right)
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// Builds the tree
    ///
    /// ```text
    ///         m
    ///       /   \
    ///      f     t
    ///     / \   / \
    ///    c   h p   w
    /// ```
    #[fixture]
    fn balanced() -> OrderedMap<String, f64> {
        let mut map = OrderedMap::new();
        let keys = ["m", "f", "t", "c", "h", "p", "w"];
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        for (key, value) in keys.into_iter().zip(values) {
            map.insert(key.to_string(), value);
        }
        map
    }

    fn preorder_keys<V>(map: &OrderedMap<String, V>) -> Vec<&str> {
        map.iter_preorder().map(|(key, _)| key.as_str()).collect()
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty() {
        let map: OrderedMap = OrderedMap::new();
        assert_eq!(format!("{map}"), "{}");
    }

    #[rstest]
    fn test_display_sorted() {
        let map: OrderedMap<i32, String> = [(3, "three"), (1, "one"), (2, "two")]
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        assert_eq!(format!("{map}"), "{1: one, 2: two, 3: three}");
    }

    #[rstest]
    fn test_debug_sorted() {
        let map: OrderedMap<i32, i32> = [(2, 20), (1, 10)].into_iter().collect();
        assert_eq!(format!("{map:?}"), "{1: 10, 2: 20}");
    }

    // =========================================================================
    // Shape Tests
    // =========================================================================

    #[rstest]
    fn test_insert_attaches_leaves(balanced: OrderedMap<String, f64>) {
        assert_eq!(preorder_keys(&balanced), vec!["m", "f", "c", "h", "t", "p", "w"]);
        assert_eq!(balanced.height(), 3);
    }

    #[rstest]
    fn test_update_keeps_shape(mut balanced: OrderedMap<String, f64>) {
        let before: Vec<String> = preorder_keys(&balanced)
            .into_iter()
            .map(str::to_string)
            .collect();
        assert!(balanced.update("f", 99.0));
        assert_eq!(preorder_keys(&balanced), before);
        assert_eq!(balanced.get("f"), Some(&99.0));
    }

    #[rstest]
    fn test_erase_leaf(mut balanced: OrderedMap<String, f64>) {
        assert!(balanced.erase("c"));
        assert_eq!(preorder_keys(&balanced), vec!["m", "f", "h", "t", "p", "w"]);
    }

    #[rstest]
    fn test_erase_one_child_splices_child(mut balanced: OrderedMap<String, f64>) {
        assert!(balanced.erase("c"));
        assert!(balanced.erase("f"));
        assert_eq!(preorder_keys(&balanced), vec!["m", "h", "t", "p", "w"]);
    }

    #[rstest]
    fn test_erase_two_children_takes_successor(mut balanced: OrderedMap<String, f64>) {
        let successor_value = *balanced.get("p").unwrap();
        assert!(balanced.erase("m"));
        // "p" moved into the root position, keeping its value.
        assert_eq!(preorder_keys(&balanced), vec!["p", "f", "c", "h", "t", "w"]);
        assert_eq!(balanced.get("p"), Some(&successor_value));
        assert_eq!(balanced.len(), 6);
    }

    #[rstest]
    fn test_erase_two_children_successor_with_right_child() {
        let mut map: OrderedMap<i32, i32> = OrderedMap::new();
        for key in [50, 30, 70, 60, 65, 80] {
            map.insert(key, key * 10);
        }
        assert!(map.erase(&50));
        let keys: Vec<i32> = map.iter_preorder().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec![60, 30, 70, 65, 80]);
        assert_eq!(map.get(&60), Some(&600));
    }

    #[rstest]
    fn test_erase_only_entry() {
        let mut map: OrderedMap = OrderedMap::new();
        map.insert("solo".to_string(), 1.0);
        assert!(map.erase("solo"));
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.height(), 0);
    }

    // =========================================================================
    // Positional Tests
    // =========================================================================

    #[rstest]
    #[case(0, "m")]
    #[case(1, "f")]
    #[case(2, "c")]
    #[case(3, "h")]
    #[case(4, "t")]
    #[case(5, "p")]
    #[case(6, "w")]
    fn test_get_index_is_preorder(
        balanced: OrderedMap<String, f64>,
        #[case] index: usize,
        #[case] expected: &str,
    ) {
        let (key, value) = balanced.get_index(index).unwrap();
        assert_eq!(key, expected);
        assert_eq!(balanced.get(key.as_str()), Some(value));
    }

    #[rstest]
    fn test_get_index_out_of_range(balanced: OrderedMap<String, f64>) {
        assert_eq!(balanced.get_index(7), None);
        assert_eq!(
            balanced.try_get_index(7),
            Err(OrderedMapError::IndexOutOfBounds {
                index: 7,
                length: 7
            })
        );
    }

    #[rstest]
    fn test_iterators_are_exact_size(balanced: OrderedMap<String, f64>) {
        let mut iterator = balanced.iter();
        assert_eq!(iterator.len(), 7);
        iterator.next();
        assert_eq!(iterator.len(), 6);

        let mut preorder = balanced.iter_preorder();
        preorder.next();
        preorder.next();
        assert_eq!(preorder.len(), 5);
    }

    // =========================================================================
    // Ownership Tests
    // =========================================================================

    #[rstest]
    fn test_clone_keeps_shape(balanced: OrderedMap<String, f64>) {
        let copy = balanced.clone();
        assert_eq!(preorder_keys(&copy), preorder_keys(&balanced));
        assert_eq!(copy, balanced);
    }

    #[rstest]
    fn test_clone_from_replaces_contents(balanced: OrderedMap<String, f64>) {
        let mut target: OrderedMap = [("zz".to_string(), 0.0)].into_iter().collect();
        target.clone_from(&balanced);
        assert_eq!(target, balanced);
        assert!(!target.contains("zz"));
    }

    #[rstest]
    fn test_swap_exchanges_lengths(mut balanced: OrderedMap<String, f64>) {
        let mut other: OrderedMap = OrderedMap::new();
        balanced.swap(&mut other);
        assert_eq!(balanced.len(), 0);
        assert_eq!(other.len(), 7);
    }

    #[rstest]
    fn test_into_iter_sorted(balanced: OrderedMap<String, f64>) {
        let keys: Vec<String> = balanced.into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["c", "f", "h", "m", "p", "t", "w"]);
    }

    #[rstest]
    fn test_into_iter_partially_consumed() {
        let map: OrderedMap<i32, i32> = (0..100).map(|key| (key, key)).collect();
        let mut iterator = map.into_iter();
        assert_eq!(iterator.next(), Some((0, 0)));
        assert_eq!(iterator.len(), 99);
        drop(iterator);
    }

    #[rstest]
    fn test_degenerate_tree_has_linear_height() {
        let map: OrderedMap<u32, u32> = (0..10_000).map(|key| (key, key)).collect();
        assert_eq!(map.height(), 10_000);
        let copy = map.clone();
        assert_eq!(copy.len(), 10_000);
        assert_eq!(copy.get_index(9_999), Some((&9_999, &9_999)));
        drop(copy);
        drop(map);
    }

    #[rstest]
    fn test_min_max(balanced: OrderedMap<String, f64>) {
        assert_eq!(balanced.min().map(|(key, _)| key.as_str()), Some("c"));
        assert_eq!(balanced.max().map(|(key, _)| key.as_str()), Some("w"));
        let empty: OrderedMap = OrderedMap::new();
        assert_eq!(empty.min(), None);
        assert_eq!(empty.max(), None);
    }

    #[rstest]
    fn test_clear(mut balanced: OrderedMap<String, f64>) {
        balanced.clear();
        assert!(balanced.is_empty());
        assert_eq!(balanced.len(), 0);
        assert!(!balanced.contains("m"));
    }
}
