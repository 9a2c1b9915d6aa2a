//! Doubly-linked list addressed by position.
//!
//! The list owns its [`Storage`]; every element lives in a [`Node`] slot and
//! nodes are chained by storage keys. `next` links define the order, `prev`
//! links are purely navigational. Ownership flows from the list through the
//! storage, so there are no reference-counted cycles to break on drop.
//!
//! # Invariants
//!
//! - for every node `n` with `n.next == m`, `m.prev == n`
//! - head's `prev` and tail's `next` are `K::NONE`
//! - `len == 0` iff head and tail are both `K::NONE`
//! - `len == 1` iff head and tail are the same node
//! - `len` equals the number of nodes reachable from head
//!
//! # Example
//!
//! ```
//! use nexus_dlist::{List, ListError};
//!
//! let mut list: List<u32> = List::new();
//! list.push_back(10).unwrap();
//! list.push_back(20).unwrap();
//! list.push_back(30).unwrap();
//! assert_eq!(list.get(1), Ok(&20));
//!
//! list.insert(1, 99).unwrap();
//! list.remove(0).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [99, 20, 30]);
//!
//! assert_eq!(list.find_index(&30, |a, b| a == b), Ok(2));
//! assert_eq!(list.get(3), Err(ListError::OutOfRange { index: 3, len: 3 }));
//! ```
//!
//! # Choosing storage
//!
//! ```
//! use nexus_dlist::{BoxedList, ListError, VecList};
//!
//! // Growable: fails only if the key space or the allocator runs out
//! let mut growable: VecList<u64> = VecList::new();
//! growable.push_back(1).unwrap();
//!
//! // Bounded: every node slot allocated up front
//! let mut bounded: BoxedList<u64> = BoxedList::with_capacity(1).unwrap();
//! bounded.push_back(1).unwrap();
//!
//! // A rejected element comes back to the caller
//! let err = bounded.push_back(2).unwrap_err();
//! assert_eq!(err.into_inner(), 2);
//! assert_eq!(ListError::from(err), ListError::Allocation);
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::{BoxedStorage, Cursor, Full, InsertError, Key, ListError, Storage, VecStorage};

/// List over growable [`VecStorage`].
pub type VecList<T, K = u32> = List<T, VecStorage<Node<T, K>, K>, K>;

/// List over fixed-capacity [`BoxedStorage`].
pub type BoxedList<T, K = u32> = List<T, BoxedStorage<Node<T, K>, K>, K>;

/// List over `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabList<T> = List<T, slab::Slab<Node<T, usize>>, usize>;

/// A list node: one element plus its links.
///
/// Only ever built by the list; it is public so storage types can be named.
#[derive(Debug)]
pub struct Node<T, K: Key = u32> {
    data: T,
    prev: K,
    next: K,
}

impl<T, K: Key> Node<T, K> {
    #[inline]
    fn new(data: T) -> Self {
        Self {
            data,
            prev: K::NONE,
            next: K::NONE,
        }
    }
}

/// A doubly-linked list that owns its node storage.
///
/// Elements are addressed by 0-based position from the head. Positional
/// operations are O(n) and walk from whichever end is closer.
///
/// # Type Parameters
///
/// - `T`: element type; the element width is `size_of::<T>()`
/// - `S`: node storage (default [`VecStorage`])
/// - `K`: key type linking nodes (default `u32`)
pub struct List<T, S = VecStorage<Node<T>>, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    storage: S,
    head: K,
    tail: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key> List<T, VecStorage<Node<T, K>, K>, K> {
    /// Creates an empty list over growable storage. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            storage: VecStorage::new(),
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }
}

impl<T, K: Key> Default for List<T, VecStorage<Node<T, K>, K>, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key> List<T, BoxedStorage<Node<T, K>, K>, K> {
    /// Creates an empty list holding at most `capacity` elements.
    ///
    /// All node slots are allocated here; later insertions never allocate.
    ///
    /// # Errors
    ///
    /// - [`ListError::InvalidArgument`] if `capacity` is 0 or larger than
    ///   the key type can address
    /// - [`ListError::Allocation`] if the slots cannot be allocated
    pub fn with_capacity(capacity: usize) -> Result<Self, ListError> {
        Self::with_storage(BoxedStorage::try_with_capacity(capacity)?)
    }
}

// =============================================================================
// Base impl - any storage
// =============================================================================

impl<T, S, K: Key> List<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Creates an empty list over the given storage.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidArgument`] if `storage` already holds
    /// nodes; the list must own every node in its storage.
    pub fn with_storage(storage: S) -> Result<Self, ListError> {
        if !storage.is_empty() {
            return Err(ListError::InvalidArgument);
        }

        Ok(Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed width, in bytes, of one element.
    #[inline]
    pub const fn element_size(&self) -> usize {
        size_of::<T>()
    }

    /// Returns the backing storage.
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Appends an element after the tail.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage cannot provide a node. The
    /// list is unchanged; `Full` converts into [`ListError::Allocation`].
    #[inline]
    pub fn push_back(&mut self, value: T) -> Result<(), Full<T>> {
        let key = self.alloc(value)?;
        self.link_back(key);
        Ok(())
    }

    /// Inserts an element so that it ends up at `index`.
    ///
    /// Valid indices are `0..=len`; `index == len` appends. Elements at
    /// `index` and after shift up by one.
    ///
    /// # Errors
    ///
    /// Hands `value` back, leaving the list unchanged:
    ///
    /// - [`InsertError::OutOfRange`] if `index > len`
    /// - [`InsertError::Full`] if storage cannot provide a node
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), InsertError<T>> {
        if index > self.len {
            return Err(InsertError::OutOfRange {
                index,
                len: self.len,
                value,
            });
        }
        if index == self.len {
            return Ok(self.push_back(value)?);
        }

        let before = self.key_at(index);
        let key = self.alloc(value)?;
        self.link_before(before, key);
        Ok(())
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the head element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Empty`] if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        if self.head.is_none() {
            return Err(ListError::Empty);
        }
        Ok(self.take(self.head))
    }

    /// Removes and returns the element at `index`.
    ///
    /// Elements after `index` shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        self.check_index(index)?;
        let key = self.key_at(index);
        Ok(self.take(key))
    }

    /// Removes every element. Calling this on an empty list is a no-op.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        self.check_index(index)?;
        Ok(&self.node(self.key_at(index)).data)
    }

    /// Replaces the element at `index`, dropping the old one.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), ListError> {
        self.check_index(index)?;
        let key = self.key_at(index);
        self.node_mut(key).data = value;
        Ok(())
    }

    /// Returns the head element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.head.is_none() {
            None
        } else {
            Some(&self.node(self.head).data)
        }
    }

    /// Returns the tail element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.tail.is_none() {
            None
        } else {
            Some(&self.node(self.tail).data)
        }
    }

    /// Returns the index of the first element matching `element`.
    ///
    /// `matches` is called as `matches(element, candidate)` for each element
    /// from the head, stopping at the first `true`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotFound`] if nothing matches.
    pub fn find_index<F>(&self, element: &T, mut matches: F) -> Result<usize, ListError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.iter()
            .position(|candidate| matches(element, candidate))
            .ok_or(ListError::NotFound)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Returns an iterator over the elements, head to tail.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S, K> {
        Iter {
            storage: &self.storage,
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns a cursor positioned at the head (at the end if empty).
    ///
    /// The cursor borrows the list, so the list cannot change while the
    /// cursor is alive.
    #[inline]
    pub fn cursor(&self) -> ListCursor<'_, T, S, K> {
        ListCursor {
            list: self,
            current: self.head,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Stores `value` in a fresh, unlinked node.
    #[inline]
    fn alloc(&mut self, value: T) -> Result<K, Full<T>> {
        self.storage
            .try_insert(Node::new(value))
            .map_err(|Full(node)| Full(node.data))
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<(), ListError> {
        if index >= self.len {
            return Err(ListError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Key of the node at `index`, walking from the closer end.
    ///
    /// `index` must be `< len`.
    fn key_at(&self, index: usize) -> K {
        debug_assert!(index < self.len);

        if index <= self.len / 2 {
            let mut key = self.head;
            for _ in 0..index {
                key = self.node(key).next;
            }
            key
        } else {
            let mut key = self.tail;
            for _ in 0..self.len - 1 - index {
                key = self.node(key).prev;
            }
            key
        }
    }

    #[inline]
    fn node(&self, key: K) -> &Node<T, K> {
        debug_assert!(key.is_some());
        // Safety: every key reachable from head/tail is occupied, and the
        // storage is never handed out mutably
        unsafe { self.storage.get_unchecked(key) }
    }

    #[inline]
    fn node_mut(&mut self, key: K) -> &mut Node<T, K> {
        debug_assert!(key.is_some());
        // Safety: see `node`
        unsafe { self.storage.get_unchecked_mut(key) }
    }

    /// Links a fresh node after the tail.
    #[inline]
    fn link_back(&mut self, key: K) {
        let tail = self.tail;
        {
            let node = self.node_mut(key);
            node.prev = tail;
            node.next = K::NONE;
        }

        if tail.is_some() {
            self.node_mut(tail).next = key;
        } else {
            self.head = key;
        }

        self.tail = key;
        self.len += 1;
    }

    /// Links a fresh node in front of `before`.
    #[inline]
    fn link_before(&mut self, before: K, key: K) {
        // New node takes its links from the neighbour before the neighbour
        // is rewired
        let prev = self.node(before).prev;
        {
            let node = self.node_mut(key);
            node.prev = prev;
            node.next = before;
        }

        self.node_mut(before).prev = key;

        if prev.is_some() {
            self.node_mut(prev).next = key;
        } else {
            self.head = key;
        }

        self.len += 1;
    }

    /// Unlinks the node at `key` and returns its element.
    fn take(&mut self, key: K) -> T {
        let (prev, next) = {
            let node = self.node(key);
            (node.prev, node.next)
        };

        if prev.is_some() {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }

        self.len -= 1;

        // Safety: key came from the chain, so its slot is occupied
        unsafe { self.storage.remove_unchecked(key) }.data
    }
}

impl<T: fmt::Debug, S, K: Key> fmt::Debug for List<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, S, K: Key> IntoIterator for &'a List<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A [`Cursor`] over one list.
///
/// Created by [`List::cursor`], positioned at the head. Walking off either
/// end puts the cursor at the end position, where `move_next`/`move_prev`
/// do nothing until `move_first` or `move_last` re-anchors it.
///
/// # Example
///
/// ```
/// use nexus_dlist::{Cursor, List};
///
/// let mut list: List<u64> = List::new();
/// list.push_back(1).unwrap();
/// list.push_back(2).unwrap();
///
/// let mut cursor = list.cursor();
/// let mut seen = Vec::new();
/// cursor.move_last();
/// while let Some(&value) = cursor.current() {
///     seen.push(value);
///     cursor.move_prev();
/// }
/// assert_eq!(seen, [2, 1]);
/// assert!(cursor.is_end());
/// ```
pub struct ListCursor<'a, T, S, K: Key>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: &'a List<T, S, K>,
    current: K,
}

impl<T, S, K: Key> Cursor for ListCursor<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;

    #[inline]
    fn move_first(&mut self) {
        self.current = self.list.head;
    }

    #[inline]
    fn move_last(&mut self) {
        self.current = self.list.tail;
    }

    #[inline]
    fn move_next(&mut self) {
        if self.current.is_some() {
            self.current = self.list.node(self.current).next;
        }
    }

    #[inline]
    fn move_prev(&mut self) {
        if self.current.is_some() {
            self.current = self.list.node(self.current).prev;
        }
    }

    #[inline]
    fn is_end(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    fn current(&self) -> Option<&T> {
        if self.current.is_none() {
            None
        } else {
            Some(&self.list.node(self.current).data)
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T, S, K: Key> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, S, K: Key + 'a> Iterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let storage: &'a S = self.storage;
        // Safety: remaining > 0 means front addresses a live node
        let node = unsafe { storage.get_unchecked(self.front) };
        self.front = node.next;
        self.remaining -= 1;

        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key + 'a> DoubleEndedIterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let storage: &'a S = self.storage;
        // Safety: remaining > 0 means back addresses a live node
        let node = unsafe { storage.get_unchecked(self.back) };
        self.back = node.prev;
        self.remaining -= 1;

        Some(&node.data)
    }
}

impl<'a, T: 'a, S, K: Key + 'a> ExactSizeIterator for Iter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}
