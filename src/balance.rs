//! # Red-Black Balancing Engine
//!
//! This module holds everything that manipulates tree links without looking
//! at keys: traversal, rotation, the insertion fixup and the deletion fixup.
//! The key-aware parts (searching for an insertion slot, bounds) live in
//! [`crate::search`] and hand this module a parent and a side.
//!
//! ## Invariants Restored After Every Operation
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from the root to an absent child crosses the same number of
//!    black nodes.
//! 4. `header.leftmost` / `header.rightmost` name the minimum and maximum.
//!
//! ## Rotations
//!
//! ```text
//!        P                 H
//!       / \   rotate_left / \
//!      a   H    ───────► P   c
//!         / \           / \
//!        b   c         a   b
//! ```
//!
//! `rotate_right` is the mirror image. Both return the node that took the
//! pivot's place and update `header.root` when the pivot was the root.

use crate::arena::{Arena, Color, Header, Node, NodeId, Side};
use smallvec::{smallvec, SmallVec};

/// Explicit traversal stack. Red-black height is at most `2 * log2(n + 1)`,
/// so 64 entries covers every tree that fits comfortably in memory without
/// touching the heap.
pub(crate) type NodeStack<E> = SmallVec<[E; 64]>;

/// The link structure of a tree: node storage plus the header.
pub(crate) struct RawTree<T> {
	pub(crate) nodes: Arena<T>,
	pub(crate) header: Header,
}

impl<T> RawTree<T> {
	pub(crate) fn new() -> RawTree<T> {
		RawTree {
			nodes: Arena::new(),
			header: Header::default(),
		}
	}

	// -----------------------------------------------------------------------
	// Color Helpers
	// -----------------------------------------------------------------------

	/// Absent children are black.
	#[inline]
	pub(crate) fn is_red(&self, id: Option<NodeId>) -> bool {
		match id {
			Some(id) => self.nodes[id].color == Color::Red,
			None => false,
		}
	}

	#[inline]
	fn paint(&mut self, id: NodeId, color: Color) {
		self.nodes[id].color = color;
	}

	#[inline]
	fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
		self.nodes[id].child(side)
	}

	// -----------------------------------------------------------------------
	// Traversal Primitives
	// -----------------------------------------------------------------------

	/// Descends left from `id` as far as possible.
	pub(crate) fn leftmost_from(&self, mut id: NodeId) -> NodeId {
		while let Some(left) = self.nodes[id].left {
			id = left;
		}
		id
	}

	/// Descends right from `id` as far as possible.
	pub(crate) fn rightmost_from(&self, mut id: NodeId) -> NodeId {
		while let Some(right) = self.nodes[id].right {
			id = right;
		}
		id
	}

	/// In-order successor, or `None` when `id` is the rightmost node.
	pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
		if let Some(right) = self.nodes[id].right {
			return Some(self.leftmost_from(right));
		}

		// Climb while we are a right child; the first ancestor reached from
		// its left subtree is the successor.
		let mut node = id;
		let mut parent = self.nodes[id].parent;
		while let Some(p) = parent {
			if self.nodes[p].right != Some(node) {
				return Some(p);
			}
			node = p;
			parent = self.nodes[p].parent;
		}
		None
	}

	/// In-order predecessor, or `None` when `id` is the leftmost node.
	pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
		if let Some(left) = self.nodes[id].left {
			return Some(self.rightmost_from(left));
		}

		let mut node = id;
		let mut parent = self.nodes[id].parent;
		while let Some(p) = parent {
			if self.nodes[p].left != Some(node) {
				return Some(p);
			}
			node = p;
			parent = self.nodes[p].parent;
		}
		None
	}

	/// Whether `a` comes strictly before `b` in key order. Both must be live
	/// nodes of this tree.
	pub(crate) fn precedes(&self, a: NodeId, b: NodeId) -> bool {
		if a == b {
			return false;
		}
		let path_a = self.path_from_root(a);
		let path_b = self.path_from_root(b);
		let shared = path_a.iter().zip(path_b.iter()).take_while(|(x, y)| x == y).count();
		let ancestor = path_a[shared - 1];
		match (path_a.get(shared), path_b.get(shared)) {
			// `b` sits below `a`.
			(None, Some(&below)) => self.nodes[ancestor].right == Some(below),
			// `a` sits below `b`.
			(Some(&below), None) => self.nodes[ancestor].left == Some(below),
			(Some(&branch), Some(_)) => self.nodes[ancestor].left == Some(branch),
			(None, None) => false,
		}
	}

	fn path_from_root(&self, id: NodeId) -> NodeStack<NodeId> {
		let mut path: NodeStack<NodeId> = smallvec![id];
		let mut parent = self.nodes[id].parent;
		while let Some(p) = parent {
			path.push(p);
			parent = self.nodes[p].parent;
		}
		path.reverse();
		path
	}

	// -----------------------------------------------------------------------
	// Rotations
	// -----------------------------------------------------------------------

	/// Points `parent`'s link to `old` at `new` instead. A `None` parent
	/// means `old` is the root.
	fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
		match parent {
			None => self.header.root = new,
			Some(p) => {
				let node = &mut self.nodes[p];
				if node.left == Some(old) {
					node.left = new;
				} else {
					node.right = new;
				}
			}
		}
	}

	/// Rotates `pivot` down to the left. `pivot` must have a right child.
	pub(crate) fn rotate_left(&mut self, pivot: NodeId) -> NodeId {
		let heir = self.nodes[pivot].right.expect("rotate_left needs a right child");
		let inner = self.nodes[heir].left;

		self.nodes[pivot].right = inner;
		if let Some(inner) = inner {
			self.nodes[inner].parent = Some(pivot);
		}

		let parent = self.nodes[pivot].parent;
		self.nodes[heir].parent = parent;
		self.replace_child(parent, pivot, Some(heir));

		self.nodes[heir].left = Some(pivot);
		self.nodes[pivot].parent = Some(heir);
		heir
	}

	/// Rotates `pivot` down to the right. `pivot` must have a left child.
	pub(crate) fn rotate_right(&mut self, pivot: NodeId) -> NodeId {
		let heir = self.nodes[pivot].left.expect("rotate_right needs a left child");
		let inner = self.nodes[heir].right;

		self.nodes[pivot].left = inner;
		if let Some(inner) = inner {
			self.nodes[inner].parent = Some(pivot);
		}

		let parent = self.nodes[pivot].parent;
		self.nodes[heir].parent = parent;
		self.replace_child(parent, pivot, Some(heir));

		self.nodes[heir].right = Some(pivot);
		self.nodes[pivot].parent = Some(heir);
		heir
	}

	/// Rotates `pivot` down toward `side`.
	#[inline]
	fn rotate(&mut self, pivot: NodeId, side: Side) -> NodeId {
		match side {
			Side::Left => self.rotate_left(pivot),
			Side::Right => self.rotate_right(pivot),
		}
	}

	// -----------------------------------------------------------------------
	// Insertion Engine
	// -----------------------------------------------------------------------

	/// Links the detached node `id` as a red leaf under `parent` on `side`
	/// and rebalances.
	///
	/// `parent` and `side` come from the search step; `None` as the parent
	/// is only valid for an empty tree. The slot on `side` must be vacant.
	pub(crate) fn link(&mut self, id: NodeId, parent: Option<NodeId>, side: Side) {
		{
			let node = &mut self.nodes[id];
			node.left = None;
			node.right = None;
			node.parent = parent;
			node.color = Color::Red;
		}

		match parent {
			None => {
				debug_assert!(self.header.root.is_none(), "linked a second root");
				self.header = Header {
					root: Some(id),
					leftmost: Some(id),
					rightmost: Some(id),
				};
			}
			Some(p) => {
				debug_assert!(self.child(p, side).is_none(), "insertion slot is occupied");
				self.nodes[p].set_child(side, Some(id));
				match side {
					Side::Left if self.header.leftmost == Some(p) => {
						self.header.leftmost = Some(id);
					}
					Side::Right if self.header.rightmost == Some(p) => {
						self.header.rightmost = Some(id);
					}
					_ => {}
				}
			}
		}

		self.insert_fixup(id);
	}

	/// Walks up from a freshly linked red node until no red node has a red
	/// parent, then blackens the root.
	fn insert_fixup(&mut self, mut node: NodeId) {
		loop {
			let parent = match self.nodes[node].parent {
				Some(p) if self.nodes[p].color == Color::Red => p,
				_ => break,
			};
			// A red node is never the root, so the grandparent exists.
			let grandparent = self.nodes[parent].parent.expect("red node without a parent");
			let side = if self.nodes[grandparent].left == Some(parent) {
				Side::Left
			} else {
				Side::Right
			};

			match self.child(grandparent, side.opposite()) {
				Some(uncle) if self.nodes[uncle].color == Color::Red => {
					// Red uncle: push the blackness down one level and retry
					// two levels up.
					self.paint(parent, Color::Black);
					self.paint(uncle, Color::Black);
					self.paint(grandparent, Color::Red);
					node = grandparent;
				}
				_ => {
					let mut parent = parent;
					if self.child(parent, side.opposite()) == Some(node) {
						// Inner grandchild: turn it into the outer case.
						node = parent;
						parent = self.rotate(node, side);
					}
					self.paint(parent, Color::Black);
					self.paint(grandparent, Color::Red);
					self.rotate(grandparent, side.opposite());
					break;
				}
			}
		}

		if let Some(root) = self.header.root {
			self.paint(root, Color::Black);
		}
	}

	// -----------------------------------------------------------------------
	// Deletion Engine
	// -----------------------------------------------------------------------

	/// Unlinks `target` from the tree and rebalances. The node stays in the
	/// arena, detached, for the caller to take.
	///
	/// When `target` has two children its in-order successor is relinked
	/// into `target`'s place (links and color, not payload), so positions to
	/// the successor stay valid and keep denoting the same entry.
	pub(crate) fn unlink(&mut self, target: NodeId) {
		let (left, right, parent) = {
			let node = &self.nodes[target];
			(node.left, node.right, node.parent)
		};

		// `child` is the subtree that moves up into the spliced node's slot;
		// `child_parent` is its new parent (needed when `child` is absent).
		let child;
		let child_parent;
		let removed_color;

		match (left, right) {
			(Some(left), Some(right)) => {
				let heir = self.leftmost_from(right);
				child = self.nodes[heir].right;

				self.nodes[left].parent = Some(heir);
				self.nodes[heir].left = Some(left);

				if heir == right {
					child_parent = Some(heir);
				} else {
					let heir_parent = self.nodes[heir].parent;
					child_parent = heir_parent;
					if let Some(c) = child {
						self.nodes[c].parent = heir_parent;
					}
					if let Some(hp) = heir_parent {
						self.nodes[hp].left = child;
					}
					self.nodes[heir].right = Some(right);
					self.nodes[right].parent = Some(heir);
				}

				self.replace_child(parent, target, Some(heir));
				self.nodes[heir].parent = parent;

				// The heir inherits the target's color; the color that leaves
				// the tree is the heir's old one.
				removed_color = self.nodes[heir].color;
				let target_color = self.nodes[target].color;
				self.paint(heir, target_color);
			}
			_ => {
				child = left.or(right);
				child_parent = parent;
				if let Some(c) = child {
					self.nodes[c].parent = parent;
				}
				self.replace_child(parent, target, child);

				if self.header.leftmost == Some(target) {
					self.header.leftmost = match child {
						Some(c) => Some(self.leftmost_from(c)),
						None => parent,
					};
				}
				if self.header.rightmost == Some(target) {
					self.header.rightmost = match child {
						Some(c) => Some(self.rightmost_from(c)),
						None => parent,
					};
				}

				removed_color = self.nodes[target].color;
			}
		}

		{
			let node = &mut self.nodes[target];
			node.left = None;
			node.right = None;
			node.parent = None;
		}

		if removed_color == Color::Black {
			self.erase_fixup(child, child_parent);
		}
	}

	/// Resolves the double-black deficiency sitting at `node`, whose parent
	/// is `parent` (`node` itself may be absent).
	fn erase_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
		while node != self.header.root && !self.is_red(node) {
			let p = parent.expect("double-black below the root has a parent");
			let side = if self.nodes[p].left == node {
				Side::Left
			} else {
				Side::Right
			};

			let mut sibling = self.sibling(p, side);

			if self.nodes[sibling].color == Color::Red {
				self.paint(sibling, Color::Black);
				self.paint(p, Color::Red);
				self.rotate(p, side);
				sibling = self.sibling(p, side);
			}

			let near = self.child(sibling, side);
			let far = self.child(sibling, side.opposite());

			if !self.is_red(near) && !self.is_red(far) {
				self.paint(sibling, Color::Red);
				node = Some(p);
				parent = self.nodes[p].parent;
				continue;
			}

			if !self.is_red(far) {
				// Near red, far black: rotate the red child to the far side.
				if let Some(near) = near {
					self.paint(near, Color::Black);
				}
				self.paint(sibling, Color::Red);
				self.rotate(sibling, side.opposite());
				sibling = self.sibling(p, side);
			}

			let parent_color = self.nodes[p].color;
			self.paint(sibling, parent_color);
			self.paint(p, Color::Black);
			if let Some(far) = self.child(sibling, side.opposite()) {
				self.paint(far, Color::Black);
			}
			self.rotate(p, side);
			break;
		}

		if let Some(node) = node {
			self.paint(node, Color::Black);
		}
	}

	/// The child of `parent` opposite the deficient `side`. A black-height
	/// deficiency on one side guarantees the other side is non-empty.
	#[inline]
	fn sibling(&self, parent: NodeId, side: Side) -> NodeId {
		self.child(parent, side.opposite()).expect("double-black node without a sibling")
	}

	// -----------------------------------------------------------------------
	// Whole-Tree Operations
	// -----------------------------------------------------------------------

	/// Drops every node and resets the header.
	pub(crate) fn clear(&mut self) {
		self.nodes.clear();
		self.header = Header::default();
	}

	/// Node ids in key order.
	pub(crate) fn in_order(&self) -> Vec<NodeId> {
		let mut order = Vec::with_capacity(self.nodes.len());
		let mut cursor = self.header.leftmost;
		while let Some(id) = cursor {
			order.push(id);
			cursor = self.successor(id);
		}
		order
	}

	/// Copies the tree node by node into `nodes`, which must be empty,
	/// preserving shape and colors. Uses an explicit stack, so depth is not
	/// bounded by the call stack.
	///
	/// The copy is compacted: nodes occupy slots `0..len` in pre-order.
	pub(crate) fn copy_into(&self, mut nodes: Arena<T>) -> RawTree<T>
	where
		T: Clone,
	{
		debug_assert_eq!(nodes.len(), 0, "copy target must be empty");

		let root = match self.header.root {
			Some(root) => root,
			None => {
				return RawTree {
					nodes,
					header: Header::default(),
				}
			}
		};

		let copy_of = |source: &Node<T>, parent: Option<NodeId>, nodes: &mut Arena<T>| {
			nodes.insert(Node {
				left: None,
				right: None,
				parent,
				color: source.color,
				value: source.value.clone(),
			})
		};

		let new_root = copy_of(&self.nodes[root], None, &mut nodes);
		let mut stack: NodeStack<(NodeId, NodeId)> = smallvec![(root, new_root)];

		while let Some((source, copy)) = stack.pop() {
			for side in [Side::Right, Side::Left] {
				if let Some(child) = self.child(source, side) {
					let child_copy = copy_of(&self.nodes[child], Some(copy), &mut nodes);
					nodes[copy].set_child(side, Some(child_copy));
					stack.push((child, child_copy));
				}
			}
		}

		let mut raw = RawTree {
			nodes,
			header: Header {
				root: Some(new_root),
				leftmost: None,
				rightmost: None,
			},
		};
		raw.header.leftmost = Some(raw.leftmost_from(new_root));
		raw.header.rightmost = Some(raw.rightmost_from(new_root));
		raw
	}
}
