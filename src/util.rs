//! Test utilities for building trees of an exact shape from JSON fixtures
//!
//! Fixture nodes carry a key, a color and optional children:
//!
//! ```json
//! { "key": 20, "color": "black", "left": { "key": 10, "color": "red" } }
//! ```
use crate::arena::{Color, Header, Node, NodeId, Side};
use crate::OrderedTree;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FixtureColor {
	Red,
	Black,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TreeNode {
	key: i64,
	color: FixtureColor,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	left: Option<Box<TreeNode>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	right: Option<Box<TreeNode>>,
}

/// A tree, a key to erase from it, and the exact shape expected afterwards.
#[derive(Deserialize, Debug)]
pub(crate) struct EraseCase {
	pub(crate) name: String,
	pub(crate) tree: Option<TreeNode>,
	pub(crate) erase: i64,
	pub(crate) expected: Option<TreeNode>,
}

/// A sequence of inserts into an empty tree and the exact resulting shape.
#[derive(Deserialize, Debug)]
pub(crate) struct InsertCase {
	pub(crate) name: String,
	pub(crate) inserts: Vec<i64>,
	pub(crate) expected: Option<TreeNode>,
}

pub(crate) fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

pub(crate) fn load<T: DeserializeOwned>(name: &str) -> T {
	let file = std::fs::File::open(fixture_path(name)).expect("failed to find file");
	serde_json::from_reader(file).unwrap()
}

fn translate_node(
	tree: &mut OrderedTree<i64>,
	fixture: TreeNode,
	parent: Option<NodeId>,
	side: Side,
) -> NodeId {
	let id = tree.raw.nodes.insert(Node {
		left: None,
		right: None,
		parent,
		color: match fixture.color {
			FixtureColor::Red => Color::Red,
			FixtureColor::Black => Color::Black,
		},
		value: fixture.key,
	});
	if let Some(parent) = parent {
		tree.raw.nodes[parent].set_child(side, Some(id));
	}
	if let Some(left) = fixture.left {
		translate_node(tree, *left, Some(id), Side::Left);
	}
	if let Some(right) = fixture.right {
		translate_node(tree, *right, Some(id), Side::Right);
	}
	id
}

/// Builds a unique-key tree with exactly the given links and colors.
pub(crate) fn sample_tree(root: Option<TreeNode>) -> OrderedTree<i64> {
	let mut tree = OrderedTree::new();
	if let Some(root) = root {
		let root = translate_node(&mut tree, root, None, Side::Left);
		tree.raw.header = Header {
			root: Some(root),
			leftmost: Some(tree.raw.leftmost_from(root)),
			rightmost: Some(tree.raw.rightmost_from(root)),
		};
		tree.len = tree.raw.nodes.len();
	}
	tree
}

fn dump_node(tree: &OrderedTree<i64>, id: Option<NodeId>) -> Option<Box<TreeNode>> {
	let id = id?;
	let node = &tree.raw.nodes[id];
	Some(Box::new(TreeNode {
		key: node.value,
		color: match node.color {
			Color::Red => FixtureColor::Red,
			Color::Black => FixtureColor::Black,
		},
		left: dump_node(tree, node.left),
		right: dump_node(tree, node.right),
	}))
}

/// Dumps the tree's links and colors in fixture form.
pub(crate) fn shape_of(tree: &OrderedTree<i64>) -> Option<TreeNode> {
	dump_node(tree, tree.raw.header.root).map(|node| *node)
}

/// Renders a shape as compact JSON for assertion messages.
pub(crate) fn render(shape: &Option<TreeNode>) -> String {
	serde_json::to_string(shape).unwrap()
}
