//! Positions and iterators for [`OrderedTree`](crate::OrderedTree).
//!
//! A [`Position`] is a plain value naming one entry (or the end). It does
//! not borrow the tree, so it can be held across insertions and erasures:
//! a position stays valid until its own entry is erased, and once that
//! happens the tree recognises it as stale instead of reading another
//! entry that reused the slot.
//!
//! The borrowing iterators ([`Iter`], [`Range`]) and the owning
//! [`IntoIter`] all walk in key order and are double-ended.

use std::iter::FusedIterator;

use crate::arena::{Arena, NodeId};
use crate::balance::RawTree;

/// Location of an entry in a tree, or the one-past-the-end position.
///
/// Stepping is done through the tree: [`OrderedTree::next`] and
/// [`OrderedTree::prev`]. Stepping back from [`OrderedTree::end`] yields the
/// last entry.
///
/// [`OrderedTree::next`]: crate::OrderedTree::next
/// [`OrderedTree::prev`]: crate::OrderedTree::prev
/// [`OrderedTree::end`]: crate::OrderedTree::end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
	handle: Option<Handle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Handle {
	index: u32,
	generation: u32,
}

impl Position {
	/// The one-past-the-end position, shared by every tree.
	pub const END: Position = Position {
		handle: None,
	};

	/// Returns `true` for the one-past-the-end position.
	#[inline]
	pub fn is_end(&self) -> bool {
		self.handle.is_none()
	}
}

impl<T> RawTree<T> {
	/// Public handle for `id`, or the end position for `None`.
	pub(crate) fn position(&self, id: Option<NodeId>) -> Position {
		Position {
			handle: id.map(|id| Handle {
				index: id.raw(),
				generation: self.nodes.generation(id),
			}),
		}
	}

	/// The live node named by `pos`. `None` for the end position and for
	/// positions whose entry has been erased.
	pub(crate) fn resolve(&self, pos: Position) -> Option<NodeId> {
		let handle = pos.handle?;
		self.nodes.resolve(handle.index, handle.generation)
	}
}

// ---------------------------------------------------------------------------
// Iter
// ---------------------------------------------------------------------------

/// Borrowing iterator over every entry, in key order.
pub struct Iter<'a, T> {
	raw: &'a RawTree<T>,
	front: Option<NodeId>,
	back: Option<NodeId>,
	remaining: usize,
}

impl<'a, T> Iter<'a, T> {
	pub(crate) fn new(raw: &'a RawTree<T>, len: usize) -> Iter<'a, T> {
		Iter {
			raw,
			front: raw.header.leftmost,
			back: raw.header.rightmost,
			remaining: len,
		}
	}
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<&'a T> {
		if self.remaining == 0 {
			return None;
		}
		let id = self.front?;
		self.remaining -= 1;
		self.front = self.raw.successor(id);
		Some(&self.raw.nodes[id].value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let id = self.back?;
		self.remaining -= 1;
		self.back = self.raw.predecessor(id);
		Some(&self.raw.nodes[id].value)
	}
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
	fn clone(&self) -> Self {
		Iter {
			raw: self.raw,
			front: self.front,
			back: self.back,
			remaining: self.remaining,
		}
	}
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// Borrowing iterator over the half-open span `[first, last)` of positions,
/// such as the result of [`OrderedTree::equal_range`].
///
/// A span whose `first` is the end position or lies after `last` is empty
/// from both directions.
///
/// [`OrderedTree::equal_range`]: crate::OrderedTree::equal_range
pub struct Range<'a, T> {
	raw: &'a RawTree<T>,
	/// Next entry to yield from the front; `None` is the end position.
	front: Option<NodeId>,
	/// Exclusive back bound; `None` is the end position.
	back: Option<NodeId>,
	done: bool,
}

impl<'a, T> Range<'a, T> {
	pub(crate) fn new(raw: &'a RawTree<T>, front: Option<NodeId>, back: Option<NodeId>) -> Self {
		let done = match (front, back) {
			(None, _) => true,
			(Some(_), None) => false,
			(Some(first), Some(last)) => !raw.precedes(first, last),
		};
		Range {
			raw,
			front,
			back,
			done,
		}
	}
}

impl<'a, T> Iterator for Range<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<&'a T> {
		if self.done {
			return None;
		}
		let id = self.front?;
		self.front = self.raw.successor(id);
		self.done = self.front == self.back;
		Some(&self.raw.nodes[id].value)
	}
}

impl<T> DoubleEndedIterator for Range<'_, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		let last = match self.back {
			None => self.raw.header.rightmost,
			Some(id) => self.raw.predecessor(id),
		};
		let id = last?;
		self.back = Some(id);
		self.done = self.front == self.back;
		Some(&self.raw.nodes[id].value)
	}
}

impl<T> FusedIterator for Range<'_, T> {}

// ---------------------------------------------------------------------------
// IntoIter
// ---------------------------------------------------------------------------

/// Owning iterator that moves every value out of a tree, in key order.
pub struct IntoIter<T> {
	nodes: Arena<T>,
	order: std::vec::IntoIter<NodeId>,
}

impl<T> IntoIter<T> {
	pub(crate) fn new(raw: RawTree<T>) -> IntoIter<T> {
		let order = raw.in_order().into_iter();
		IntoIter {
			nodes: raw.nodes,
			order,
		}
	}
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		self.order.next().map(|id| self.nodes.remove(id).value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.order.size_hint()
	}
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	fn next_back(&mut self) -> Option<T> {
		self.order.next_back().map(|id| self.nodes.remove(id).value)
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
