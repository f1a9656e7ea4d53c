//! Key-extraction and ordering strategy.
//!
//! A [`Policy`] is picked once when a tree is constructed and stored with
//! it. It tells the engine how to get a key out of a stored value, how to
//! order two keys, whether equal keys may coexist, and how many entries the
//! tree may hold.

use std::cmp::Ordering;
use std::fmt;

/// Structural maximum number of entries: the arena addresses nodes with
/// `u32` indices.
pub const MAX_SIZE: usize = u32::MAX as usize - 1;

/// Whether entries with equal keys may coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Duplicates {
	/// Inserting an existing key is rejected (set and map behaviour).
	Unique,
	/// Equal keys are kept side by side, in insertion order (multiset behaviour).
	Allowed,
}

/// Strategy object configuring an [`OrderedTree`](crate::OrderedTree).
///
/// # Example
///
/// ```
/// use ordtree::{Duplicates, OrderedTree, Policy};
///
/// // Order strings by length, allowing several strings of the same length.
/// fn by_len(a: &String, b: &String) -> std::cmp::Ordering {
/// 	a.len().cmp(&b.len())
/// }
/// fn whole(s: &String) -> &String {
/// 	s
/// }
///
/// let policy = Policy::new(whole, by_len, Duplicates::Allowed);
/// let mut tree = OrderedTree::with_policy(policy);
/// tree.insert("ccc".to_string()).unwrap();
/// tree.insert("a".to_string()).unwrap();
/// tree.insert("bb".to_string()).unwrap();
/// tree.insert("dd".to_string()).unwrap();
///
/// let sorted: Vec<_> = tree.iter().map(String::as_str).collect();
/// assert_eq!(sorted, ["a", "bb", "dd", "ccc"]);
/// ```
pub struct Policy<T, K> {
	extract: fn(&T) -> &K,
	compare: fn(&K, &K) -> Ordering,
	duplicates: Duplicates,
	max_size: usize,
}

impl<T, K> Policy<T, K> {
	/// Builds a policy from a key extractor, a total order on keys and a
	/// duplicate rule. The size limit starts at [`MAX_SIZE`].
	pub fn new(
		extract: fn(&T) -> &K,
		compare: fn(&K, &K) -> Ordering,
		duplicates: Duplicates,
	) -> Policy<T, K> {
		Policy {
			extract,
			compare,
			duplicates,
			max_size: MAX_SIZE,
		}
	}

	/// Caps the number of entries the tree will accept. Values above
	/// [`MAX_SIZE`] are clamped.
	pub fn with_max_size(mut self, max_size: usize) -> Policy<T, K> {
		self.max_size = max_size.min(MAX_SIZE);
		self
	}

	/// Same extractor and order with a different duplicate rule.
	pub fn with_duplicates(mut self, duplicates: Duplicates) -> Policy<T, K> {
		self.duplicates = duplicates;
		self
	}

	#[inline]
	pub fn duplicates(&self) -> Duplicates {
		self.duplicates
	}

	#[inline]
	pub fn is_unique(&self) -> bool {
		self.duplicates == Duplicates::Unique
	}

	#[inline]
	pub fn max_size(&self) -> usize {
		self.max_size
	}

	/// Extracts the ordering key from a stored value.
	#[inline]
	pub fn key<'a>(&self, value: &'a T) -> &'a K {
		(self.extract)(value)
	}

	/// Compares two keys.
	#[inline]
	pub fn compare(&self, a: &K, b: &K) -> Ordering {
		(self.compare)(a, b)
	}
}

fn identity<T>(value: &T) -> &T {
	value
}

fn first<K, V>(pair: &(K, V)) -> &K {
	&pair.0
}

impl<T: Ord> Policy<T, T> {
	/// Values are their own keys; equal values are rejected.
	pub fn set() -> Policy<T, T> {
		Policy::new(identity, T::cmp, Duplicates::Unique)
	}

	/// Values are their own keys; equal values are kept.
	pub fn multiset() -> Policy<T, T> {
		Policy::new(identity, T::cmp, Duplicates::Allowed)
	}
}

impl<K: Ord, V> Policy<(K, V), K> {
	/// Pairs keyed by their first element; equal keys are rejected.
	pub fn map() -> Policy<(K, V), K> {
		Policy::new(first, K::cmp, Duplicates::Unique)
	}

	/// Pairs keyed by their first element; equal keys are kept.
	pub fn multimap() -> Policy<(K, V), K> {
		Policy::new(first, K::cmp, Duplicates::Allowed)
	}
}

impl<T, K> Clone for Policy<T, K> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T, K> Copy for Policy<T, K> {}

impl<T, K> fmt::Debug for Policy<T, K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Policy")
			.field("duplicates", &self.duplicates)
			.field("max_size", &self.max_size)
			.finish_non_exhaustive()
	}
}
