//! Slab-like storage with stable keys.
//!
//! Storage owns the list's nodes. A key handed out by [`Storage::try_insert`]
//! stays valid until that slot is removed, which lets nodes link to each
//! other by key instead of by pointer: no reference cycles, no `unsafe`
//! pointer juggling in the list itself.
//!
//! ```text
//! Storage<T>
//!     ├── VecStorage<T, K>   - growable, fails only when the key space or allocator runs out
//!     ├── BoxedStorage<T, K> - fixed capacity, allocated once
//!     └── slab::Slab<T>      - growable, usize keys (feature `slab`)
//! ```

mod boxed;
mod vec;

pub use boxed::BoxedStorage;
pub use vec::VecStorage;

use crate::{Full, Key};

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// - **Stable keys**: a key remains valid until its slot is removed
/// - **O(1)** insert, remove and lookup
/// - **Slot reuse**: removed slots are handed out again by later inserts
pub trait Storage<T> {
    /// Key type addressing slots in this storage.
    type Key: Key;

    /// Inserts a value, returning its key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if no slot can be obtained.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;

    /// Removes and returns the value at `key`, if occupied.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if occupied.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if occupied.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Returns a reference without checking the slot.
    ///
    /// # Safety
    ///
    /// `key` must address an occupied slot.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking the slot.
    ///
    /// # Safety
    ///
    /// `key` must address an occupied slot.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;

    /// Removes a value without checking the slot.
    ///
    /// # Safety
    ///
    /// `key` must address an occupied slot.
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T;

    /// Drops every stored value and makes all slots available again.
    fn clear(&mut self);

    /// Number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A storage slot. Vacant slots form an intrusive free list.
#[derive(Debug)]
enum Slot<T, K> {
    Occupied(T),
    Vacant { next_free: K },
}

impl<T, K: Key> Slot<T, K> {
    #[inline]
    fn value(&self) -> Option<&T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// # Safety
    ///
    /// The slot must be occupied.
    #[inline]
    unsafe fn value_unchecked(&self) -> &T {
        match self {
            Slot::Occupied(value) => value,
            // Safety: caller guarantees occupancy
            Slot::Vacant { .. } => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    /// # Safety
    ///
    /// The slot must be occupied.
    #[inline]
    unsafe fn value_unchecked_mut(&mut self) -> &mut T {
        match self {
            Slot::Occupied(value) => value,
            // Safety: caller guarantees occupancy
            Slot::Vacant { .. } => unsafe { core::hint::unreachable_unchecked() },
        }
    }
}

/// Fills the vacant slot at the head of the free list with `value`.
///
/// Returns the key of the filled slot, or gives `value` back if the free
/// list is empty.
#[inline]
fn fill_free<T, K: Key>(slots: &mut [Slot<T, K>], free_head: &mut K, value: T) -> Result<K, T> {
    let key = *free_head;
    if key.is_none() {
        return Err(value);
    }

    match core::mem::replace(&mut slots[key.as_usize()], Slot::Occupied(value)) {
        Slot::Vacant { next_free } => *free_head = next_free,
        Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
    }
    Ok(key)
}

/// Vacates the slot at `key`, pushing it onto the free list.
#[inline]
fn vacate<T, K: Key>(slots: &mut [Slot<T, K>], free_head: &mut K, key: K) -> Option<T> {
    if key.is_none() {
        return None;
    }
    let slot = slots.get_mut(key.as_usize())?;
    if slot.value().is_none() {
        return None;
    }

    let next_free = *free_head;
    *free_head = key;
    match core::mem::replace(slot, Slot::Vacant { next_free }) {
        Slot::Occupied(value) => Some(value),
        Slot::Vacant { .. } => None,
    }
}

#[inline]
fn lookup<T, K: Key>(slots: &[Slot<T, K>], key: K) -> Option<&T> {
    if key.is_none() {
        return None;
    }
    slots.get(key.as_usize()).and_then(Slot::value)
}

#[inline]
fn lookup_mut<T, K: Key>(slots: &mut [Slot<T, K>], key: K) -> Option<&mut T> {
    if key.is_none() {
        return None;
    }
    slots.get_mut(key.as_usize()).and_then(Slot::value_mut)
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>> {
        Ok(slab::Slab::insert(self, value))
    }

    #[inline]
    fn remove(&mut self, key: Self::Key) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: Self::Key) -> Option<&T> {
        slab::Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T> {
        slab::Slab::get_mut(self, key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T {
        unsafe { slab::Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, key) }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: Self::Key) -> T {
        slab::Slab::remove(self, key)
    }

    #[inline]
    fn clear(&mut self) {
        slab::Slab::clear(self);
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }
}

#[cfg(all(test, feature = "slab"))]
mod slab_tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut storage = slab::Slab::new();

        let key = Storage::try_insert(&mut storage, 42u64).unwrap();
        assert_eq!(Storage::get(&storage, key), Some(&42));

        assert_eq!(Storage::remove(&mut storage, key), Some(42));
        assert_eq!(Storage::get(&storage, key), None);
        assert_eq!(Storage::remove(&mut storage, key), None);
    }

    #[test]
    fn slot_reuse() {
        let mut storage = slab::Slab::new();

        let first = Storage::try_insert(&mut storage, 1u64).unwrap();
        Storage::remove(&mut storage, first);

        let second = Storage::try_insert(&mut storage, 2u64).unwrap();
        assert_eq!(first, second);
    }
}
