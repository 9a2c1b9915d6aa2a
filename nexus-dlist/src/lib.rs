//! Doubly-linked list over slab storage, addressed by position.
//!
//! The list owns a storage of nodes and links them by stable storage keys:
//!
//! ```text
//! Storage (VecStorage / BoxedStorage / slab::Slab) - owns nodes, hands out keys
//! List                                              - head, tail, len, links by key
//! ListCursor                                        - shared borrow + current key
//! ```
//!
//! Benefits:
//! - **No pointer cycles**: nodes reference each other by key, the list owns
//!   everything, and dropping the list drops every element exactly once
//! - **Bounded mode**: [`BoxedStorage`] allocates once; a full list reports
//!   [`ListError::Allocation`] instead of growing
//! - **Compile-time cursor safety**: a cursor borrows its list, so the list
//!   cannot be modified while a cursor is alive
//!
//! # Quick Start
//!
//! ```
//! use nexus_dlist::{Cursor, List};
//!
//! let mut list: List<u64> = List::new();
//! list.push_back(10).unwrap();
//! list.push_back(30).unwrap();
//! list.insert(1, 20).unwrap();
//!
//! assert_eq!(list.get(1), Ok(&20));
//! assert_eq!(list.len(), 3);
//!
//! let mut cursor = list.cursor();
//! let mut sum = 0;
//! while let Some(value) = cursor.current() {
//!     sum += value;
//!     cursor.move_next();
//! }
//! assert_eq!(sum, 60);
//! ```
//!
//! # Errors
//!
//! Every fallible operation leaves the list untouched on failure. Operations
//! that take an element hand it back in the error: `push_back` returns
//! [`Full<T>`] and `insert` returns [`InsertError<T>`], both of which convert
//! into [`ListError`] with `?`.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `InvalidArgument` | `with_capacity(0)`, capacity beyond the key range, pre-populated storage |
//! | `Allocation` | `with_capacity` when the slots cannot be allocated; `push_back` / `insert` when storage has no free slot |
//! | `OutOfRange` | `get`, `set`, `remove` with `index >= len`; `insert` with `index > len` |
//! | `Empty` | `pop_front` on an empty list |
//! | `NotFound` | `find_index` without a match |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab` and the `SlabList` alias

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod key;
pub mod list;
pub mod storage;

pub use cursor::Cursor;
pub use error::{Full, InsertError, ListError};
pub use key::Key;
pub use list::{BoxedList, Iter, List, ListCursor, Node, VecList};
pub use storage::{BoxedStorage, Storage, VecStorage};

#[cfg(feature = "slab")]
pub use list::SlabList;
