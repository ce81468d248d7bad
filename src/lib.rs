//! An ordered set on an unbalanced binary search tree with parent back-links.
//!
//! [`BstSet`] keeps distinct values in ascending order and supports insertion, lookup,
//! removal and in-order traversal. Positions are exposed as [`Cursor`]s which, unlike
//! borrowing iterators, survive mutation of the set and are checked on every use:
//!
//! - dereferencing the end cursor returns [`CursorError::End`];
//! - using a cursor whose value was erased (or moved during an erase) returns
//!   [`CursorError::Invalidated`].
//!
//! # Example
//!
//! ```
//! use parent_bst::{BstSet, CursorError};
//!
//! let mut set = BstSet::new();
//! for value in [1, 3, 5, 2, 4] {
//!     set.insert(value);
//! }
//!
//! let three = set.find(&3);
//! assert_eq!(set.get(three), Ok(&3));
//!
//! set.erase(three).unwrap();
//! assert!(set.iter().eq([1, 2, 4, 5].iter()));
//! assert_eq!(set.find(&3), set.end());
//! assert_eq!(set.get(three), Err(CursorError::Invalidated));
//! ```
//!
//! # Implementation
//!
//! Nodes are stored in a flat arena and linked by integer handles: each node owns its two
//! children and keeps a non-owning handle to its parent, which is what lets a cursor find
//! its in-order successor without a stack. Every arena slot carries a generation counter,
//! and a cursor remembers the generation it saw; that is how stale cursors are detected.
//!
//! The tree does **not** rebalance. Nodes track their height and balance factor, but the
//! values are informational only, so inserting sorted input builds a chain and operations
//! degrade to O(n). All algorithms are iterative, so that never exhausts the call stack.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Handles instead of pointers for the cyclic parent/child graph
//! - **Pluggable order** - Any [`Comparator`], including closures, orders the set

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod cursor;
mod raw;

pub mod bst_set;

pub use bst_set::BstSet;
pub use comparator::{Comparator, NaturalOrder};
pub use cursor::{Cursor, CursorError};
