//! Node keys with a reserved sentinel.
//!
//! Links between nodes are stored as keys into the list's storage rather
//! than pointers. The `NONE` sentinel stands in for an absent link, so a
//! node costs two plain integers of link overhead instead of two `Option`s.

/// Key type used to link nodes inside storage.
///
/// The largest value of the type is reserved as [`Key::NONE`], which also
/// bounds how many nodes a storage can address: a `u8` keyed storage holds
/// at most 255 nodes.
///
/// # Example
///
/// ```
/// use nexus_dlist::Key;
///
/// let key: u16 = 7;
/// assert!(key.is_some());
/// assert!(u16::NONE.is_none());
/// assert_eq!(u16::from_usize(7), key);
/// ```
pub trait Key: Copy + Eq {
    /// Sentinel meaning "no node".
    const NONE: Self;

    /// Creates a key from a slot position.
    fn from_usize(val: usize) -> Self;

    /// Returns the slot position this key addresses.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this addresses a slot.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Number of distinct slots this key type can address, capped at
    /// `usize::MAX` where the key is wider than `usize`.
    fn max_slots() -> usize;
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(
                        <$ty>::try_from(val).is_ok_and(|key| key != <$ty>::MAX),
                        "slot position overflows key"
                    );
                    val as $ty
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }

                #[inline]
                fn max_slots() -> usize {
                    usize::try_from(<$ty>::MAX).unwrap_or(usize::MAX)
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_key_sentinel {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty>::NONE.is_none());
                    assert!(!<$ty>::NONE.is_some());
                    assert!((0 as $ty).is_some());
                    assert!((<$ty>::MAX - 1).is_some());
                }
            )*
        };
    }

    test_key_sentinel!(
        u8 => u8_sentinel,
        u16 => u16_sentinel,
        u32 => u32_sentinel,
        u64 => u64_sentinel,
        usize => usize_sentinel
    );

    #[test]
    fn max_slots_excludes_sentinel() {
        assert_eq!(u8::max_slots(), 255);
        assert_eq!(u16::max_slots(), 65_535);
        assert_eq!(usize::max_slots(), usize::MAX);
    }

    #[test]
    fn max_slots_saturates_for_wide_keys() {
        // u64 is at least as wide as usize on every supported target
        assert_eq!(u64::max_slots(), usize::MAX);
        assert!(u64::max_slots() >= u32::max_slots());
    }

    #[test]
    fn from_usize_accepts_last_slot() {
        assert_eq!(u8::from_usize(254), 254);
        assert_eq!(u64::from_usize(usize::MAX - 1).as_usize(), usize::MAX - 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "slot position overflows key")]
    fn from_usize_rejects_sentinel() {
        let _ = u8::from_usize(255);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "slot position overflows key")]
    fn from_usize_rejects_wider_than_key() {
        let _ = u16::from_usize(70_000);
    }

    #[test]
    fn position_roundtrip() {
        for i in [0usize, 1, 100, 1000, u16::MAX as usize - 1] {
            assert_eq!(u32::from_usize(i).as_usize(), i);
        }
    }
}
