//! # Ordtree: An Arena-Backed Red-Black Tree
//!
//! This crate provides the balanced-tree engine behind ordered sets,
//! multisets and maps. One generic container, [`OrderedTree`], is configured
//! at construction time by a [`Policy`]: how to extract a key from a stored
//! value, how to order keys, and whether equal keys may coexist.
//!
//! ## Design Overview
//!
//! **Arena Nodes**: Nodes live in a slot arena and link to each other by
//! `u32` index. Parent/child back-links are plain indices, so there are no
//! ownership cycles, and a node never moves once placed.
//!
//! **Explicit Header**: The tree keeps a header with three separately named
//! links (root, leftmost, rightmost). `begin()` and stepping back from
//! `end()` are O(1) lookups in the header.
//!
//! **Generational Positions**: A [`Position`] names an entry by slot index
//! and slot generation. It does not borrow the tree, stays valid across
//! unrelated inserts and erases, and is reported as stale once its own entry
//! is gone.
//!
//! ### Tree Structure
//!
//! ```text
//!         ┌──────────────────────────────┐
//!         │ Header                       │
//!         │  root ─────────┐             │
//!         │  leftmost ─┐   │  rightmost ─┼──┐
//!         └────────────┼───┼─────────────┘  │
//!                      │   ▼                │
//!                      │  [ 5 B ]           │
//!                      │  /     \           │
//!                      │ [3 B]  [8 B]       │
//!                      ▼ /  \    /  \       ▼
//!                   [1 R][4 R][7 R][9 R]
//! ```
//!
//! ## Basic Usage
//!
//! ```
//! use ordtree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//! 	tree.insert(key).unwrap();
//! }
//!
//! let sorted: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(sorted, [1, 3, 4, 5, 7, 8, 9]);
//!
//! // Positions survive unrelated erasures.
//! let three = tree.find(&3);
//! tree.erase_key(&4);
//! assert_eq!(tree.get(three), Some(&3));
//!
//! // Erase returns the position that followed the erased entry.
//! let next = tree.erase(three).unwrap();
//! assert_eq!(tree.get(next), Some(&5));
//! ```
//!
//! ## Maps and Multisets
//!
//! ```
//! use ordtree::{OrderedTree, Policy};
//!
//! let mut ages = OrderedTree::with_policy(Policy::map());
//! ages.insert(("bob", 31)).unwrap();
//! ages.insert(("alice", 29)).unwrap();
//! assert_eq!(ages.at(&"alice").unwrap().1, 29);
//!
//! let mut bag = OrderedTree::new_multi();
//! bag.insert_many([3, 1, 3, 3]).unwrap();
//! assert_eq!(bag.count(&3), 3);
//! ```
//!
//! ## Concurrency
//!
//! The tree is a plain single-owner structure: mutation needs `&mut self`,
//! and every operation runs to completion without yielding. Share it across
//! threads behind a lock.

use std::fmt;

use log::{debug, trace};
use smallvec::smallvec;

mod arena;
mod balance;
pub mod error;
pub mod iter;
pub mod policy;
mod search;
#[cfg(test)]
mod util;

use arena::{Arena, Color, Node, NodeId};
use balance::{NodeStack, RawTree};
use search::InsertPosition;

pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, Position, Range};
pub use policy::{Duplicates, Policy, MAX_SIZE};

// ---------------------------------------------------------------------------
// Core Tree Structure
// ---------------------------------------------------------------------------

/// An ordered container of values, balanced as a red-black tree.
///
/// # Type Parameters
///
/// - `T`: The stored value type.
/// - `K`: The key type extracted from each value by the tree's [`Policy`].
///   For sets and multisets `K = T`; for maps `T = (K, V)`.
///
/// # Complexity
///
/// Insert, erase, find and the bounds are O(log n). `len`, `begin`, `end`
/// and stepping back from `end` are O(1). Iteration is O(n) overall.
///
/// # Positions
///
/// A [`Position`] belongs to the tree that produced it. Using it with a
/// different tree (including a clone) is a logic error; the result is
/// unspecified but never memory-unsafe.
pub struct OrderedTree<T, K = T> {
	raw: RawTree<T>,
	/// Live entry count, tracked separately from the link structure.
	len: usize,
	policy: Policy<T, K>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<T: Ord> OrderedTree<T, T> {
	/// Creates an empty set: values are their own keys and must be unique.
	///
	/// # Example
	///
	/// ```
	/// use ordtree::OrderedTree;
	///
	/// let mut tree = OrderedTree::new();
	/// assert_eq!(tree.insert(1).unwrap().1, true);
	/// assert_eq!(tree.insert(1).unwrap().1, false);
	/// assert_eq!(tree.len(), 1);
	/// ```
	pub fn new() -> Self {
		OrderedTree::with_policy(Policy::set())
	}

	/// Creates an empty multiset: equal values are kept side by side.
	pub fn new_multi() -> Self {
		OrderedTree::with_policy(Policy::multiset())
	}
}

impl<K: Ord, V> OrderedTree<(K, V), K> {
	/// Creates an empty map of `(key, value)` pairs with unique keys.
	pub fn new_map() -> Self {
		OrderedTree::with_policy(Policy::map())
	}
}

impl<T, K> OrderedTree<T, K> {
	/// Creates an empty tree driven by `policy`.
	pub fn with_policy(policy: Policy<T, K>) -> Self {
		OrderedTree {
			raw: RawTree::new(),
			len: 0,
			policy,
		}
	}

	/// The policy this tree was built with.
	pub fn policy(&self) -> &Policy<T, K> {
		&self.policy
	}

	// -----------------------------------------------------------------------
	// Size
	// -----------------------------------------------------------------------

	/// Number of entries. O(1).
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// The most entries this tree will accept.
	#[inline]
	pub fn max_size(&self) -> usize {
		self.policy.max_size()
	}

	// -----------------------------------------------------------------------
	// Positions
	// -----------------------------------------------------------------------

	/// Position of the smallest entry, or [`end`](Self::end) when empty.
	pub fn begin(&self) -> Position {
		self.raw.position(self.raw.header.leftmost)
	}

	/// The one-past-the-end position.
	#[inline]
	pub fn end(&self) -> Position {
		Position::END
	}

	/// The position after `pos`.
	///
	/// Stepping past the last entry yields [`end`](Self::end). Stepping from
	/// `end` itself, or from a stale position, also yields `end`.
	pub fn next(&self, pos: Position) -> Position {
		match self.raw.resolve(pos) {
			Some(id) => self.raw.position(self.raw.successor(id)),
			None => Position::END,
		}
	}

	/// The position before `pos`.
	///
	/// Stepping back from [`end`](Self::end) yields the last entry. Stepping
	/// back from the first entry, or from a stale position, yields `end`.
	///
	/// # Example
	///
	/// ```
	/// use ordtree::OrderedTree;
	///
	/// let tree: OrderedTree<i32> = [1, 2, 3].into_iter().collect();
	/// let last = tree.prev(tree.end());
	/// assert_eq!(tree.get(last), Some(&3));
	/// assert!(tree.prev(tree.begin()).is_end());
	/// ```
	pub fn prev(&self, pos: Position) -> Position {
		if pos.is_end() {
			return self.raw.position(self.raw.header.rightmost);
		}
		match self.raw.resolve(pos) {
			Some(id) => self.raw.position(self.raw.predecessor(id)),
			None => Position::END,
		}
	}

	/// The value at `pos`, or `None` for `end` and stale positions.
	pub fn get(&self, pos: Position) -> Option<&T> {
		self.raw.resolve(pos).map(|id| &self.raw.nodes[id].value)
	}

	/// Mutable access to the value at `pos`.
	///
	/// Changing the part of the value its key is extracted from, in a way
	/// that changes its order relative to other entries, is a logic error.
	pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
		let id = self.raw.resolve(pos)?;
		Some(&mut self.raw.nodes[id].value)
	}

	/// The smallest entry.
	pub fn first(&self) -> Option<&T> {
		self.raw.header.leftmost.map(|id| &self.raw.nodes[id].value)
	}

	/// The largest entry.
	pub fn last(&self) -> Option<&T> {
		self.raw.header.rightmost.map(|id| &self.raw.nodes[id].value)
	}

	// -----------------------------------------------------------------------
	// Lookup
	// -----------------------------------------------------------------------

	/// Position of an entry whose key equals `key`, or `end`. With
	/// duplicates, the first of the equal entries.
	pub fn find(&self, key: &K) -> Position {
		self.raw.position(self.raw.find(key, &self.policy))
	}

	pub fn contains(&self, key: &K) -> bool {
		self.raw.find(key, &self.policy).is_some()
	}

	/// Position of the first entry whose key is not less than `key`.
	pub fn lower_bound(&self, key: &K) -> Position {
		self.raw.position(self.raw.lower_bound(key, &self.policy))
	}

	/// Position of the first entry whose key is greater than `key`.
	pub fn upper_bound(&self, key: &K) -> Position {
		self.raw.position(self.raw.upper_bound(key, &self.policy))
	}

	/// The span `[lower_bound(key), upper_bound(key))` of entries equal to
	/// `key`.
	///
	/// # Example
	///
	/// ```
	/// use ordtree::OrderedTree;
	///
	/// let mut tree = OrderedTree::new_multi();
	/// tree.insert_many([1, 1, 2, 3, 3, 3, 5]).unwrap();
	///
	/// let (first, last) = tree.equal_range(&3);
	/// assert_eq!(tree.range(first, last).count(), 3);
	/// assert_eq!(tree.get(last), Some(&5));
	/// ```
	pub fn equal_range(&self, key: &K) -> (Position, Position) {
		(self.lower_bound(key), self.upper_bound(key))
	}

	/// Number of entries whose key equals `key`.
	pub fn count(&self, key: &K) -> usize {
		let mut cursor = self.raw.lower_bound(key, &self.policy);
		let end = self.raw.upper_bound(key, &self.policy);
		let mut n = 0;
		while cursor != end {
			n += 1;
			cursor = cursor.and_then(|id| self.raw.successor(id));
		}
		n
	}

	/// The entry whose key equals `key`.
	///
	/// # Errors
	///
	/// [`Error::KeyNotFound`] when no entry matches.
	pub fn at(&self, key: &K) -> Result<&T> {
		match self.raw.find(key, &self.policy) {
			Some(id) => Ok(&self.raw.nodes[id].value),
			None => Err(Error::KeyNotFound),
		}
	}

	/// Mutable access to the entry whose key equals `key`. The same key
	/// mutation caveat as [`get_mut`](Self::get_mut) applies.
	///
	/// # Errors
	///
	/// [`Error::KeyNotFound`] when no entry matches.
	pub fn at_mut(&mut self, key: &K) -> Result<&mut T> {
		match self.raw.find(key, &self.policy) {
			Some(id) => Ok(&mut self.raw.nodes[id].value),
			None => Err(Error::KeyNotFound),
		}
	}

	// -----------------------------------------------------------------------
	// Insertion
	// -----------------------------------------------------------------------

	/// Inserts `value`, returning its position and whether it was inserted.
	///
	/// With unique keys, inserting a key that is already present leaves the
	/// tree unchanged, drops `value`, and returns the existing entry's
	/// position with `false`. With duplicates allowed the new entry goes after
	/// every equal entry.
	///
	/// # Errors
	///
	/// - [`Error::CapacityExceeded`] when the tree already holds
	///   [`max_size`](Self::max_size) entries.
	/// - [`Error::Allocation`] when node storage cannot grow.
	///
	/// In both cases the tree is unchanged.
	pub fn insert(&mut self, value: T) -> Result<(Position, bool)> {
		let slot = self.raw.insert_position(self.policy.key(&value), &self.policy);
		let (parent, side) = match slot {
			InsertPosition::Occupied(id) => return Ok((self.raw.position(Some(id)), false)),
			InsertPosition::Vacant {
				parent,
				side,
			} => (parent, side),
		};

		if self.len >= self.policy.max_size() {
			debug!("insert rejected: tree is at its maximum size of {}", self.policy.max_size());
			return Err(Error::CapacityExceeded {
				max_size: self.policy.max_size(),
			});
		}
		self.raw.nodes.reserve_one()?;

		// The value is fully built before the node becomes reachable.
		let id = self.raw.nodes.insert(Node::detached(value));
		self.raw.link(id, parent, side);
		self.len += 1;

		Ok((self.raw.position(Some(id)), true))
	}

	/// Inserts every value in order, returning one result per value.
	///
	/// # Errors
	///
	/// Stops at the first failing insert and returns its error. Values
	/// inserted before the failure stay in the tree.
	pub fn insert_many<I>(&mut self, values: I) -> Result<Vec<(Position, bool)>>
	where
		I: IntoIterator<Item = T>,
	{
		let values = values.into_iter();
		let mut results = Vec::with_capacity(values.size_hint().0);
		for value in values {
			results.push(self.insert(value)?);
		}
		Ok(results)
	}

	// -----------------------------------------------------------------------
	// Erasure
	// -----------------------------------------------------------------------

	/// Removes the entry at `pos`, returning its value and the position of
	/// the entry that followed it.
	///
	/// Positions to every other entry stay valid, including the entry that
	/// followed: when the erased entry had two children, its in-order
	/// successor is relinked into its place rather than copied.
	///
	/// # Errors
	///
	/// [`Error::InvalidPosition`] if `pos` is `end`, the tree is empty, or
	/// the entry at `pos` has already been erased. The tree is unchanged.
	pub fn remove(&mut self, pos: Position) -> Result<(T, Position)> {
		let id = match self.raw.resolve(pos) {
			Some(id) => id,
			None => {
				debug!("remove rejected: {:?} is not a live entry", pos);
				return Err(Error::InvalidPosition);
			}
		};

		let next = self.raw.successor(id);
		self.raw.unlink(id);
		let node = self.raw.nodes.remove(id);
		self.len -= 1;

		Ok((node.value, self.raw.position(next)))
	}

	/// Erases the entry at `pos` and returns the position that followed it.
	///
	/// # Errors
	///
	/// Same as [`remove`](Self::remove).
	pub fn erase(&mut self, pos: Position) -> Result<Position> {
		self.remove(pos).map(|(_, next)| next)
	}

	/// Erases every entry whose key equals `key`, returning how many were
	/// erased.
	pub fn erase_key(&mut self, key: &K) -> usize {
		let (mut cursor, end) = self.equal_range(key);
		let mut n = 0;
		while cursor != end {
			cursor = self.erase(cursor).expect("equal range entry is live");
			n += 1;
		}
		n
	}

	/// Removes every entry. Positions taken before the clear become stale.
	pub fn clear(&mut self) {
		trace!("clearing tree of {} entries", self.len);
		self.raw.clear();
		self.len = 0;
	}

	// -----------------------------------------------------------------------
	// Whole-Tree Operations
	// -----------------------------------------------------------------------

	/// Moves every entry of `other` that this tree can accept into this
	/// tree, returning how many were moved.
	///
	/// Entries whose key collides with an existing entry of a unique-key
	/// tree stay in `other`, as do entries that would push this tree past
	/// its maximum size. Values are moved, never cloned, and neither tree
	/// rebuilds: each moved entry costs one erase in `other` and one insert
	/// here.
	///
	/// # Errors
	///
	/// [`Error::Allocation`] if this tree's storage cannot grow. Merging
	/// stops at that entry; entries moved before it stay moved and both
	/// trees remain valid.
	///
	/// # Example
	///
	/// ```
	/// use ordtree::OrderedTree;
	///
	/// let mut a: OrderedTree<i32> = [1, 3, 5].into_iter().collect();
	/// let mut b: OrderedTree<i32> = [2, 3, 4].into_iter().collect();
	///
	/// assert_eq!(a.merge(&mut b)?, 2);
	/// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
	/// assert_eq!(b.iter().copied().collect::<Vec<_>>(), [3]);
	/// # Ok::<(), ordtree::Error>(())
	/// ```
	pub fn merge(&mut self, other: &mut OrderedTree<T, K>) -> Result<usize> {
		let mut moved = 0;
		let mut kept = 0;
		let mut cursor = other.raw.header.leftmost;

		while let Some(id) = cursor {
			// Successor first: unlinking never moves the successor's node.
			cursor = other.raw.successor(id);

			let slot = self.raw.insert_position(
				self.policy.key(&other.raw.nodes[id].value),
				&self.policy,
			);
			let (parent, side) = match slot {
				InsertPosition::Vacant {
					parent,
					side,
				} => (parent, side),
				InsertPosition::Occupied(_) => {
					kept += 1;
					continue;
				}
			};
			if self.len >= self.policy.max_size() {
				kept += 1;
				continue;
			}
			if let Err(e) = self.raw.nodes.reserve_one() {
				debug!("merge stopped after {} entries: {}", moved, e);
				return Err(e.into());
			}

			other.raw.unlink(id);
			let node = other.raw.nodes.remove(id);
			other.len -= 1;

			let new_id = self.raw.nodes.insert(node);
			self.raw.link(new_id, parent, side);
			self.len += 1;
			moved += 1;
		}

		trace!("merge moved {} entries, {} stayed in the source", moved, kept);
		Ok(moved)
	}

	/// Takes the whole tree in O(1), leaving an empty tree with the same
	/// policy behind.
	pub fn take(&mut self) -> Self {
		let empty = OrderedTree::with_policy(self.policy);
		std::mem::replace(self, empty)
	}

	/// Exchanges the contents (and policies) of two trees in O(1).
	pub fn swap(&mut self, other: &mut Self) {
		std::mem::swap(self, other);
	}

	/// Structural copy that reports allocation failure instead of aborting.
	///
	/// The copy has the same shape and coloring. Positions of `self` do not
	/// carry over.
	///
	/// # Errors
	///
	/// [`Error::Allocation`] if storage for `len()` nodes cannot be reserved.
	pub fn try_clone(&self) -> Result<Self>
	where
		T: Clone,
	{
		let nodes = Arena::try_with_capacity(self.len)?;
		Ok(self.clone_into_arena(nodes))
	}

	fn clone_into_arena(&self, nodes: Arena<T>) -> Self
	where
		T: Clone,
	{
		trace!("copying tree of {} entries", self.len);
		OrderedTree {
			raw: self.raw.copy_into(nodes),
			len: self.len,
			policy: self.policy,
		}
	}

	// -----------------------------------------------------------------------
	// Iteration
	// -----------------------------------------------------------------------

	/// Iterates over every entry in key order.
	pub fn iter(&self) -> Iter<'_, T> {
		Iter::new(&self.raw, self.len)
	}

	/// Iterates over the half-open span `[first, last)`.
	///
	/// A stale position is treated as `end`. When `first` is `end` or comes
	/// after `last` the range is empty.
	pub fn range(&self, first: Position, last: Position) -> Range<'_, T> {
		Range::new(&self.raw, self.raw.resolve(first), self.raw.resolve(last))
	}

	// -----------------------------------------------------------------------
	// Shape
	// -----------------------------------------------------------------------

	/// Number of nodes on the longest root-to-leaf path; 0 when empty.
	pub fn height(&self) -> usize {
		let root = match self.raw.header.root {
			Some(root) => root,
			None => return 0,
		};
		let mut deepest = 0;
		let mut stack: NodeStack<(NodeId, usize)> = smallvec![(root, 1)];
		while let Some((id, depth)) = stack.pop() {
			deepest = deepest.max(depth);
			let node = &self.raw.nodes[id];
			for child in [node.left, node.right].into_iter().flatten() {
				stack.push((child, depth + 1));
			}
		}
		deepest
	}

	/// Number of black nodes on any root-to-leaf path; 0 when empty.
	pub fn black_height(&self) -> usize {
		let mut blacks = 0;
		let mut cursor = self.raw.header.root;
		while let Some(id) = cursor {
			let node = &self.raw.nodes[id];
			if node.color == Color::Black {
				blacks += 1;
			}
			cursor = node.left;
		}
		blacks
	}
}

// ===========================================================================
// Invariant Validation
// ===========================================================================

/// Invariant validation for testing. Compiled for this crate's own tests and
/// when the `test-utils` feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
impl<T, K: fmt::Debug> OrderedTree<T, K> {
	/// Validates all tree invariants. Panics with diagnostic info if any
	/// invariant is violated.
	///
	/// Meant for tests and debugging; it walks the whole tree.
	///
	/// # Invariants Checked
	///
	/// 1. Uniform black height on every root-to-leaf path
	/// 2. No red node has a red child
	/// 3. The root is black
	/// 4. In-order keys are non-decreasing (strictly increasing when unique)
	/// 5. The header's leftmost/rightmost are the minimum and maximum
	/// 6. The entry count matches the nodes reachable from the root
	/// 7. Every child's parent link points back at its parent
	pub fn assert_invariants(&self) {
		let header = self.raw.header;
		assert_eq!(
			self.len,
			self.raw.nodes.len(),
			"len {} != live arena slots {}",
			self.len,
			self.raw.nodes.len()
		);

		let root = match header.root {
			Some(root) => root,
			None => {
				assert_eq!(self.len, 0, "Empty tree reports len {}", self.len);
				assert_eq!(header.leftmost, None, "Empty tree has a leftmost link");
				assert_eq!(header.rightmost, None, "Empty tree has a rightmost link");
				return;
			}
		};

		// Invariant 3: Black root
		assert_eq!(self.raw.nodes[root].parent, None, "Root has a parent link");
		assert_eq!(self.raw.nodes[root].color, Color::Black, "Root is red");

		// Invariants 1, 2 and 7, in one explicit-stack walk.
		let mut black_height = None;
		let mut reachable = 0usize;
		let mut stack: NodeStack<(NodeId, usize)> = smallvec![(root, 0)];
		while let Some((id, blacks_above)) = stack.pop() {
			reachable += 1;
			let node = &self.raw.nodes[id];
			let blacks = blacks_above + (node.color == Color::Black) as usize;

			for child in [node.left, node.right] {
				match child {
					Some(child) => {
						let child_node = &self.raw.nodes[child];
						assert_eq!(
							child_node.parent,
							Some(id),
							"Parent link of {:?} does not point back at {:?}",
							self.policy.key(&child_node.value),
							self.policy.key(&node.value)
						);
						assert!(
							!(node.color == Color::Red && child_node.color == Color::Red),
							"Red node {:?} has red child {:?}",
							self.policy.key(&node.value),
							self.policy.key(&child_node.value)
						);
						stack.push((child, blacks));
					}
					None => match black_height {
						None => black_height = Some(blacks),
						Some(expected) => assert_eq!(
							blacks,
							expected,
							"Black height {} below {:?} differs from {}",
							blacks,
							self.policy.key(&node.value),
							expected
						),
					},
				}
			}
		}

		// Invariant 6: Count consistency
		assert_eq!(reachable, self.len, "Reachable nodes {} != len {}", reachable, self.len);

		// Invariant 5: Cached bounds
		assert_eq!(
			header.leftmost,
			Some(self.raw.leftmost_from(root)),
			"Cached leftmost is not the minimum"
		);
		assert_eq!(
			header.rightmost,
			Some(self.raw.rightmost_from(root)),
			"Cached rightmost is not the maximum"
		);

		// Invariant 4: Key ordering
		let unique = self.policy.is_unique();
		let mut visited = 0usize;
		let mut previous: Option<&K> = None;
		let mut cursor = header.leftmost;
		while let Some(id) = cursor {
			let key = self.policy.key(&self.raw.nodes[id].value);
			if let Some(prev) = previous {
				let ordering = self.policy.compare(prev, key);
				if unique {
					assert!(
						ordering.is_lt(),
						"Keys not strictly increasing: {:?} then {:?}",
						prev,
						key
					);
				} else {
					assert!(ordering.is_le(), "Keys out of order: {:?} then {:?}", prev, key);
				}
			}
			previous = Some(key);
			visited += 1;
			cursor = self.raw.successor(id);
		}
		assert_eq!(visited, self.len, "In-order walk visited {} of {} entries", visited, self.len);
	}
}

// ===========================================================================
// Trait Implementations
// ===========================================================================

impl<T: Ord> Default for OrderedTree<T, T> {
	fn default() -> Self {
		OrderedTree::new()
	}
}

impl<T: Clone, K> Clone for OrderedTree<T, K> {
	/// Deep structural copy: same shape, same colors, compacted storage.
	fn clone(&self) -> Self {
		self.clone_into_arena(Arena::new())
	}
}

impl<T: fmt::Debug, K> fmt::Debug for OrderedTree<T, K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<T: PartialEq, K> PartialEq for OrderedTree<T, K> {
	/// Trees are equal when they hold equal values in the same order,
	/// regardless of shape.
	fn eq(&self, other: &Self) -> bool {
		self.len == other.len && self.iter().eq(other.iter())
	}
}

impl<T: Eq, K> Eq for OrderedTree<T, K> {}

impl<T: Ord> FromIterator<T> for OrderedTree<T, T> {
	/// Collects into a set; later duplicates are dropped.
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut tree = OrderedTree::new();
		tree.extend(iter);
		tree
	}
}

impl<T, K> Extend<T> for OrderedTree<T, K> {
	/// Inserts every value; rejected duplicates are dropped.
	///
	/// # Panics
	///
	/// Panics if the tree reaches its maximum size or storage cannot grow.
	/// Use [`insert_many`](OrderedTree::insert_many) to handle those errors.
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			if let Err(error) = self.insert(value) {
				panic!("OrderedTree::extend: {}", error);
			}
		}
	}
}

impl<T, K> IntoIterator for OrderedTree<T, K> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(self) -> IntoIter<T> {
		IntoIter::new(self.raw)
	}
}

impl<'a, T, K> IntoIterator for &'a OrderedTree<T, K> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;

	fn into_iter(self) -> Iter<'a, T> {
		self.iter()
	}
}
