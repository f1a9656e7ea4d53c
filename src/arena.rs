//! # Node Storage for the Red-Black Tree
//!
//! Nodes live in a slot arena and refer to each other by stable `u32` indices
//! instead of pointers. A node never moves once it has been placed in a slot,
//! so a [`Position`](crate::Position) taken before an unrelated insert or
//! erase keeps pointing at the same entry afterwards.
//!
//! ## Slot Lifecycle
//!
//! ```text
//!   insert()                 remove()
//!  ─────────► Occupied ─────────────────► Vacant (generation + 1)
//!                ▲                            │
//!                └──────── reused by insert ◄─┘
//! ```
//!
//! Every slot carries a generation counter that is bumped whenever its node
//! is removed. Public positions record the generation they were created
//! with, which lets the tree recognise a position to an erased entry even
//! after the slot has been handed out again.

use std::collections::TryReserveError;
use std::fmt;
use std::ops::{Index, IndexMut};

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Stable index of a node inside an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
	#[inline]
	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}

	#[inline]
	pub(crate) fn raw(self) -> u32 {
		self.0
	}
}

impl fmt::Debug for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Node color. An absent child counts as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
	Red,
	Black,
}

/// Which child slot of a parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
	Left,
	Right,
}

impl Side {
	#[inline]
	pub(crate) fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

/// A vertex of the red-black tree.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
	pub(crate) left: Option<NodeId>,
	pub(crate) right: Option<NodeId>,
	pub(crate) parent: Option<NodeId>,
	pub(crate) color: Color,
	pub(crate) value: T,
}

impl<T> Node<T> {
	/// A node that is not yet linked into any tree.
	///
	/// New nodes start red; the insertion engine overwrites every link and the
	/// color when it attaches the node.
	pub(crate) fn detached(value: T) -> Node<T> {
		Node {
			left: None,
			right: None,
			parent: None,
			color: Color::Red,
			value,
		}
	}

	#[inline]
	pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
		match side {
			Side::Left => self.left,
			Side::Right => self.right,
		}
	}

	#[inline]
	pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
		match side {
			Side::Left => self.left = child,
			Side::Right => self.right = child,
		}
	}
}

/// The tree's entry point and bound cache.
///
/// All three links are `None` exactly when the tree is empty. `leftmost` and
/// `rightmost` are maintained incrementally by the insertion and deletion
/// engines rather than recomputed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Header {
	pub(crate) root: Option<NodeId>,
	pub(crate) leftmost: Option<NodeId>,
	pub(crate) rightmost: Option<NodeId>,
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

struct Slot<T> {
	generation: u32,
	node: Option<Node<T>>,
}

/// Slot storage for tree nodes with a free list of vacant slots.
pub(crate) struct Arena<T> {
	slots: Vec<Slot<T>>,
	free: Vec<NodeId>,
	live: usize,
}

impl<T> Arena<T> {
	pub(crate) fn new() -> Arena<T> {
		Arena {
			slots: Vec::new(),
			free: Vec::new(),
			live: 0,
		}
	}

	/// Creates an arena with room for `capacity` nodes, reporting allocation
	/// failure instead of aborting.
	pub(crate) fn try_with_capacity(capacity: usize) -> Result<Arena<T>, TryReserveError> {
		let mut slots = Vec::new();
		slots.try_reserve_exact(capacity)?;
		Ok(Arena {
			slots,
			free: Vec::new(),
			live: 0,
		})
	}

	/// Number of occupied slots.
	#[inline]
	pub(crate) fn len(&self) -> usize {
		self.live
	}

	/// Makes sure the next [`insert`](Self::insert) will not need to allocate.
	pub(crate) fn reserve_one(&mut self) -> Result<(), TryReserveError> {
		if self.free.is_empty() {
			self.slots.try_reserve(1)?;
		}
		Ok(())
	}

	/// Places `node` in a vacant slot, reusing freed slots first.
	pub(crate) fn insert(&mut self, node: Node<T>) -> NodeId {
		self.live += 1;
		match self.free.pop() {
			Some(id) => {
				let slot = &mut self.slots[id.index()];
				debug_assert!(slot.node.is_none(), "free list handed out an occupied slot");
				slot.node = Some(node);
				id
			}
			None => {
				let id = NodeId(self.slots.len() as u32);
				self.slots.push(Slot {
					generation: 0,
					node: Some(node),
				});
				id
			}
		}
	}

	/// Takes the node out of its slot and retires the slot's generation.
	///
	/// # Panics
	///
	/// Panics if the slot is already vacant.
	pub(crate) fn remove(&mut self, id: NodeId) -> Node<T> {
		let slot = &mut self.slots[id.index()];
		let node = slot.node.take().expect("removed a vacant arena slot");
		slot.generation = slot.generation.wrapping_add(1);
		self.free.push(id);
		self.live -= 1;
		node
	}

	/// Drops every node. Slot generations survive so that positions taken
	/// before the clear are still recognised as stale.
	pub(crate) fn clear(&mut self) {
		for slot in self.slots.iter_mut() {
			if slot.node.take().is_some() {
				slot.generation = slot.generation.wrapping_add(1);
			}
		}
		self.free.clear();
		// Reversed so that the lowest indices are handed out first.
		self.free.extend((0..self.slots.len() as u32).rev().map(NodeId));
		self.live = 0;
	}

	/// Current generation of the slot at `id`.
	#[inline]
	pub(crate) fn generation(&self, id: NodeId) -> u32 {
		self.slots[id.index()].generation
	}

	/// Looks up a node by raw index and generation, as recorded in a position.
	pub(crate) fn resolve(&self, index: u32, generation: u32) -> Option<NodeId> {
		let slot = self.slots.get(index as usize)?;
		if slot.generation == generation && slot.node.is_some() {
			Some(NodeId(index))
		} else {
			None
		}
	}
}

impl<T> Index<NodeId> for Arena<T> {
	type Output = Node<T>;

	#[inline]
	fn index(&self, id: NodeId) -> &Node<T> {
		match self.slots[id.index()].node {
			Some(ref node) => node,
			None => panic!("arena slot {:?} is vacant", id),
		}
	}
}

impl<T> IndexMut<NodeId> for Arena<T> {
	#[inline]
	fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
		match self.slots[id.index()].node {
			Some(ref mut node) => node,
			None => panic!("arena slot {:?} is vacant", id),
		}
	}
}
