//! # Error Types for the Ordered Tree
//!
//! Every fallible operation on [`OrderedTree`](crate::OrderedTree) either
//! completes or reports one of these errors *before* touching the tree, so
//! the tree is always left in a valid state.
//!
//! ## Error Flow
//!
//! ```text
//! insert(value)
//!      │
//!      ▼
//! Search for slot ───────────► key exists ──► Ok((existing, false))
//!      │
//!      ▼
//! len == max_size? ──────────► Err(CapacityExceeded)
//!      │
//!      ▼
//! Reserve arena slot ────────► Err(Allocation)
//!      │
//!      ▼
//! Link + rebalance (infallible)
//!      │
//!      ▼
//! Ok((position, true))
//! ```
//!
//! Nothing is retried; all operations are synchronous and deterministic.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the ordered tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// The tree already holds its configured maximum number of entries.
	///
	/// Returned by insertion before any mutation; the tree is unchanged.
	/// The limit comes from [`Policy::with_max_size`](crate::Policy::with_max_size)
	/// and never exceeds [`MAX_SIZE`](crate::MAX_SIZE).
	#[error("tree is at its maximum size of {max_size} entries")]
	CapacityExceeded {
		/// The limit that was hit.
		max_size: usize,
	},

	/// A position did not denote a live entry of this tree.
	///
	/// This occurs when:
	/// - Erasing at [`end()`](crate::OrderedTree::end)
	/// - Erasing from an empty tree
	/// - Using a position whose entry has already been erased
	///
	/// These are caller contract violations. They are detected in O(1) via
	/// slot generations and reported rather than corrupting the tree.
	#[error("position does not refer to a live entry")]
	InvalidPosition,

	/// A keyed lookup that requires a match found none.
	#[error("key not found")]
	KeyNotFound,

	/// Growing node storage failed. The value being inserted is dropped and
	/// the tree is unchanged.
	#[error("failed to allocate a tree node: {0}")]
	Allocation(#[from] TryReserveError),
}

/// A Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
