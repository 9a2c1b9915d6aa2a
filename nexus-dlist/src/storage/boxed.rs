use super::{Slot, Storage, fill_free, lookup, lookup_mut, vacate};
use crate::{Full, Key, ListError};

/// Fixed-capacity storage allocated once at construction.
///
/// Every slot exists from the start and is threaded onto the free list, so
/// insertion never touches the allocator. Once all slots are occupied,
/// `try_insert` returns `Err(Full(value))` until something is removed.
///
/// # Example
///
/// ```
/// use nexus_dlist::{BoxedStorage, Storage};
///
/// let mut storage: BoxedStorage<u64> = BoxedStorage::with_capacity(2);
/// let a = storage.try_insert(1).unwrap();
/// storage.try_insert(2).unwrap();
/// assert!(storage.try_insert(3).is_err());
///
/// storage.remove(a);
/// assert_eq!(storage.try_insert(3), Ok(a));
/// ```
#[derive(Debug)]
pub struct BoxedStorage<T, K: Key = u32> {
    slots: Box<[Slot<T, K>]>,
    free_head: K,
    len: usize,
}

impl<T, K: Key> BoxedStorage<T, K> {
    /// Creates storage with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0, exceeds the key type's addressable range,
    /// or the slots cannot be allocated. See [`try_with_capacity`] for the
    /// fallible version.
    ///
    /// [`try_with_capacity`]: BoxedStorage::try_with_capacity
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= K::max_slots(),
            "capacity exceeds key type maximum"
        );

        match Self::try_with_capacity(capacity) {
            Ok(storage) => storage,
            Err(_) => panic!("failed to allocate {} slots", capacity),
        }
    }

    /// Creates storage with exactly `capacity` slots, reporting failure
    /// instead of panicking.
    ///
    /// # Errors
    ///
    /// - [`ListError::InvalidArgument`] if `capacity` is 0 or exceeds the key
    ///   type's addressable range
    /// - [`ListError::Allocation`] if the slots cannot be allocated
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ListError> {
        if capacity == 0 || capacity > K::max_slots() {
            return Err(ListError::InvalidArgument);
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| ListError::Allocation)?;
        slots.extend((0..capacity).map(|i| Slot::Vacant {
            next_free: next_free_at(i, capacity),
        }));

        Ok(Self {
            slots: slots.into_boxed_slice(),
            free_head: K::from_usize(0),
            len: 0,
        })
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }
}

/// Free-list successor of slot `i` in a freshly initialized storage.
#[inline]
fn next_free_at<K: Key>(i: usize, capacity: usize) -> K {
    if i + 1 < capacity {
        K::from_usize(i + 1)
    } else {
        K::NONE
    }
}

impl<T, K: Key> Storage<T> for BoxedStorage<T, K> {
    type Key = K;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        let key = fill_free(&mut self.slots, &mut self.free_head, value).map_err(Full)?;
        self.len += 1;
        Ok(key)
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
        let capacity = self.slots.len();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = Slot::Vacant {
                next_free: next_free_at(i, capacity),
            };
        }
        self.free_head = K::from_usize(0);
        self.len = 0;
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}
