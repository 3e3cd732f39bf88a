/*
Conversion of the arena tree into a `termtree::Tree` for terminal drawing.

termtree has no notion of left/right, so a node with a single child gets a
placeholder for the missing side to keep the two apart. Drawing stops at
`MAX_DRAWN_DEPTH` levels; deeper subtrees collapse into a single marker.
 */
use colored::Colorize;
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{BstArena, BstNode};

/// Label for a missing child next to a present sibling.
pub const MISSING_CHILD: &str = "·";

/// Label standing in for a subtree below the drawn depth.
pub const ELIDED_SUBTREE: &str = "…";

/// Levels drawn before a subtree is elided.
pub const MAX_DRAWN_DEPTH: usize = 64;

pub const EMPTY_TREE: &str = "Empty Tree - Type a command to start";

pub trait TreeRender {
    /// Plain labels, no color.
    fn to_tree_string(&self) -> Tree<String>;

    /// Labels colored by decoration: found green, highlighted yellow, others blue.
    fn to_colored_tree(&self) -> Tree<String>;
}

fn plain_label(node: &BstNode) -> String {
    node.value.to_string()
}

fn colored_label(node: &BstNode) -> String {
    let label = node.value.to_string();
    if node.decoration.found {
        label.green().bold().to_string()
    } else if node.decoration.highlighted {
        label.yellow().bold().to_string()
    } else {
        label.blue().to_string()
    }
}

fn build(
    tree: &BstArena,
    idx: Index,
    depth: usize,
    label: fn(&BstNode) -> String,
) -> Tree<String> {
    let Some(node) = tree.get_node(idx) else {
        return Tree::new(MISSING_CHILD.to_string());
    };
    if node.is_leaf() {
        return Tree::new(label(node));
    }
    if depth + 1 >= MAX_DRAWN_DEPTH {
        return Tree::new(label(node)).with_leaves([ELIDED_SUBTREE.to_string()]);
    }
    let child = |side: Option<Index>| match side {
        Some(child) => build(tree, child, depth + 1, label),
        None => Tree::new(MISSING_CHILD.to_string()),
    };
    Tree::new(label(node)).with_leaves([child(node.left), child(node.right)])
}

impl TreeRender for BstArena {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => build(self, root, 0, plain_label),
            None => Tree::new(EMPTY_TREE.to_string()),
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn to_colored_tree(&self) -> Tree<String> {
        match self.root() {
            Some(root) => build(self, root, 0, colored_label),
            None => Tree::new(EMPTY_TREE.to_string()),
        }
    }
}
