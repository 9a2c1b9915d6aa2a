use super::{Slot, Storage, fill_free, lookup, lookup_mut, vacate};
use crate::{Full, Key};

/// Growable storage backed by a `Vec` of slots.
///
/// Grows on demand, reusing vacated slots first (LIFO). Insertion fails
/// only when the key type cannot address another slot or the allocator
/// refuses to grow the vector, so the key width doubles as a size cap:
///
/// ```
/// use nexus_dlist::{Storage, VecStorage};
///
/// let mut storage: VecStorage<u64, u8> = VecStorage::new();
/// for i in 0..255 {
///     storage.try_insert(i).unwrap();
/// }
/// // u8::MAX is the sentinel, so slot 255 cannot be addressed
/// assert_eq!(storage.try_insert(255).unwrap_err().into_inner(), 255);
/// ```
#[derive(Debug)]
pub struct VecStorage<T, K: Key = u32> {
    slots: Vec<Slot<T, K>>,
    free_head: K,
    len: usize,
}

impl<T, K: Key> VecStorage<T, K> {
    /// Creates empty storage. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Creates empty storage with room for `capacity` values before it
    /// needs to grow.
    ///
    /// The capacity is a hint: if it cannot be reserved the storage starts
    /// empty and grows on demand, with each insert reporting its own failure.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::new();
        let _ = slots.try_reserve_exact(capacity.min(K::max_slots()));

        Self {
            slots,
            free_head: K::NONE,
            len: 0,
        }
    }

    /// Returns how many values fit before the vector reallocates.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}

impl<T, K: Key> Default for VecStorage<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key> Storage<T> for VecStorage<T, K> {
    type Key = K;

    fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        let value = match fill_free(&mut self.slots, &mut self.free_head, value) {
            Ok(key) => {
                self.len += 1;
                return Ok(key);
            }
            Err(value) => value,
        };

        let position = self.slots.len();
        if position >= K::max_slots() || self.slots.try_reserve(1).is_err() {
            return Err(Full(value));
        }

        self.slots.push(Slot::Occupied(value));
        self.len += 1;
        Ok(K::from_usize(position))
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let value = vacate(&mut self.slots, &mut self.free_head, key)?;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        lookup(&self.slots, key)
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        lookup_mut(&mut self.slots, key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        // Safety: caller guarantees key is in bounds and occupied
        unsafe { self.slots.get_unchecked(key.as_usize()).value_unchecked() }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        // Safety: caller guarantees key is in bounds and occupied
        unsafe { self.slots.get_unchecked_mut(key.as_usize()).value_unchecked_mut() }
    }

    #[inline]
    unsafe fn remove_unchecked(&mut self, key: K) -> T {
        match vacate(&mut self.slots, &mut self.free_head, key) {
            Some(value) => {
                self.len -= 1;
                value
            }
            // Safety: caller guarantees the slot is occupied
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free_head = K::NONE;
        self.len = 0;
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let storage: VecStorage<u64> = VecStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.len(), 0);
        assert_eq!(storage.capacity(), 0);
    }

    #[test]
    fn with_capacity_reserves_up_front() {
        let storage: VecStorage<u64> = VecStorage::with_capacity(64);
        assert!(storage.capacity() >= 64);
        assert!(storage.is_empty());
    }

    #[test]
    fn with_capacity_unallocatable_hint_starts_empty() {
        let mut storage: VecStorage<u64, u64> = VecStorage::with_capacity(usize::MAX);
        assert_eq!(storage.capacity(), 0);

        let key = storage.try_insert(5).unwrap();
        assert_eq!(storage.get(key), Some(&5));
    }

    #[test]
    fn insert_get_remove() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let key = storage.try_insert(42).unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(key), Some(&42));

        assert_eq!(storage.remove(key), Some(42));
        assert_eq!(storage.get(key), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn get_mut() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let key = storage.try_insert(10).unwrap();
        *storage.get_mut(key).unwrap() = 20;

        assert_eq!(storage.get(key), Some(&20));
    }

    #[test]
    fn slot_reuse_is_lifo() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let k0 = storage.try_insert(0).unwrap();
        let k1 = storage.try_insert(1).unwrap();
        let _k2 = storage.try_insert(2).unwrap();

        storage.remove(k0);
        storage.remove(k1);

        assert_eq!(storage.try_insert(3).unwrap(), k1);
        assert_eq!(storage.try_insert(4).unwrap(), k0);
        assert_eq!(storage.len(), 3);
    }

    #[test]
    fn double_remove_returns_none() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let key = storage.try_insert(42).unwrap();
        storage.remove(key);

        assert_eq!(storage.remove(key), None);
        assert_eq!(storage.len(), 0);
    }

    #[test]
    fn sentinel_and_out_of_bounds_keys_miss() {
        let mut storage: VecStorage<u64> = VecStorage::new();
        storage.try_insert(1).unwrap();

        assert_eq!(storage.get(u32::NONE), None);
        assert_eq!(storage.get(7), None);
        assert_eq!(storage.remove(u32::NONE), None);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn key_space_exhaustion() {
        let mut storage: VecStorage<u64, u8> = VecStorage::new();

        for i in 0..255 {
            storage.try_insert(i).unwrap();
        }

        let err = storage.try_insert(999).unwrap_err();
        assert_eq!(err.into_inner(), 999);
        assert_eq!(storage.len(), 255);

        // A vacated slot is usable again
        storage.remove(10);
        assert_eq!(storage.try_insert(1000), Ok(10));
    }

    #[test]
    fn clear_resets() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let k = storage.try_insert(1).unwrap();
        storage.try_insert(2).unwrap();
        storage.remove(k);

        storage.clear();
        assert!(storage.is_empty());
        assert_eq!(storage.try_insert(7), Ok(0));
    }

    #[test]
    fn drop_cleans_up() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug)]
        struct DropCounter;
        impl Drop for DropCounter {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        {
            let mut storage: VecStorage<DropCounter> = VecStorage::new();
            storage.try_insert(DropCounter).unwrap();
            let key = storage.try_insert(DropCounter).unwrap();
            storage.try_insert(DropCounter).unwrap();
            drop(storage.remove(key));
            assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 1);
        }

        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 3);
    }
}
