//! Error types for list and storage operations.

use core::fmt;

/// Error returned by [`List`](crate::List) operations.
///
/// Every operation validates its arguments before touching the chain, so an
/// `Err` always means the list is exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// A constructor argument cannot back a list: zero capacity, capacity
    /// beyond the key range, or pre-populated storage.
    InvalidArgument,
    /// Storage could not provide a slot for a new node.
    Allocation,
    /// Positional index outside the operation's valid range.
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// List length at the time of the call.
        len: usize,
    },
    /// The operation needs at least one element.
    Empty,
    /// No element satisfied the search predicate.
    NotFound,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::InvalidArgument => write!(f, "invalid argument"),
            ListError::Allocation => write!(f, "no storage available for a new node"),
            ListError::OutOfRange { index, len } => {
                write!(f, "index {} out of range for list of length {}", index, len)
            }
            ListError::Empty => write!(f, "list is empty"),
            ListError::NotFound => write!(f, "no matching element"),
        }
    }
}

impl std::error::Error for ListError {}

/// Error returned when storage cannot take another value.
///
/// Carries the rejected value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

impl<T> From<Full<T>> for ListError {
    #[inline]
    fn from(_: Full<T>) -> Self {
        ListError::Allocation
    }
}

/// Error returned by [`List::insert`](crate::List::insert).
///
/// Either way the element is handed back and the list is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError<T> {
    /// `index` was greater than the list length.
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// List length at the time of the call.
        len: usize,
        /// The element that was not inserted.
        value: T,
    },
    /// Storage could not provide a slot for a new node.
    Full(T),
}

impl<T> InsertError<T> {
    /// Returns the element that could not be inserted.
    pub fn into_inner(self) -> T {
        match self {
            InsertError::OutOfRange { value, .. } => value,
            InsertError::Full(value) => value,
        }
    }

    /// Returns the [`ListError`] this failure corresponds to.
    pub fn kind(&self) -> ListError {
        match *self {
            InsertError::OutOfRange { index, len, .. } => ListError::OutOfRange { index, len },
            InsertError::Full(_) => ListError::Allocation,
        }
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind(), f)
    }
}

impl<T: fmt::Debug> std::error::Error for InsertError<T> {}

impl<T> From<Full<T>> for InsertError<T> {
    #[inline]
    fn from(full: Full<T>) -> Self {
        InsertError::Full(full.0)
    }
}

impl<T> From<InsertError<T>> for ListError {
    #[inline]
    fn from(err: InsertError<T>) -> Self {
        err.kind()
    }
}
