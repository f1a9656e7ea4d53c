//! Key-directed descent used by insert, find, the bounds and merge.
//!
//! Everything here is one root-to-leaf walk comparing a search key against
//! each visited node's key. Ties go right when looking for an insertion slot,
//! so equal keys line up in insertion order.

use std::cmp::Ordering;

use crate::arena::{NodeId, Side};
use crate::balance::RawTree;
use crate::policy::Policy;

/// Outcome of looking for the place a key would be linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertPosition {
	/// The key may be linked as `side` child of `parent` (`None` for an
	/// empty tree).
	Vacant {
		parent: Option<NodeId>,
		side: Side,
	},
	/// A unique-key tree already holds an equal key at this node.
	Occupied(NodeId),
}

impl<T> RawTree<T> {
	/// Finds where `key` would be linked. With [`Duplicates::Unique`]
	/// an equal key stops the descent early.
	///
	/// [`Duplicates::Unique`]: crate::Duplicates::Unique
	pub(crate) fn insert_position<K>(&self, key: &K, policy: &Policy<T, K>) -> InsertPosition {
		let unique = policy.is_unique();
		let mut parent = None;
		let mut side = Side::Left;
		let mut cursor = self.header.root;

		while let Some(id) = cursor {
			parent = Some(id);
			let ordering = policy.compare(key, policy.key(&self.nodes[id].value));
			side = match ordering {
				Ordering::Equal if unique => return InsertPosition::Occupied(id),
				Ordering::Less => Side::Left,
				_ => Side::Right,
			};
			cursor = self.nodes[id].child(side);
		}

		InsertPosition::Vacant {
			parent,
			side,
		}
	}

	/// First node whose key is not less than `key`.
	pub(crate) fn lower_bound<K>(&self, key: &K, policy: &Policy<T, K>) -> Option<NodeId> {
		self.partition_point(policy, |node_key| policy.compare(node_key, key) != Ordering::Less)
	}

	/// First node whose key is greater than `key`.
	pub(crate) fn upper_bound<K>(&self, key: &K, policy: &Policy<T, K>) -> Option<NodeId> {
		self.partition_point(policy, |node_key| policy.compare(key, node_key) == Ordering::Less)
	}

	/// Lower bound refined by one equality check.
	pub(crate) fn find<K>(&self, key: &K, policy: &Policy<T, K>) -> Option<NodeId> {
		self.lower_bound(key, policy).filter(|&id| {
			policy.compare(key, policy.key(&self.nodes[id].value)) == Ordering::Equal
		})
	}

	/// First node in key order for which `at_or_after` holds. The predicate
	/// must be false for a prefix of the in-order sequence and true for the
	/// rest; the descent never stops early on equality.
	fn partition_point<K, F>(&self, policy: &Policy<T, K>, at_or_after: F) -> Option<NodeId>
	where
		F: Fn(&K) -> bool,
	{
		let mut found = None;
		let mut cursor = self.header.root;

		while let Some(id) = cursor {
			let node = &self.nodes[id];
			if at_or_after(policy.key(&node.value)) {
				found = Some(id);
				cursor = node.left;
			} else {
				cursor = node.right;
			}
		}

		found
	}
}
