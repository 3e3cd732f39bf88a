//! Binary search tree engine backed by a generational arena.
//!
//! Nodes live in an [`Arena`] and reference their children by [`Index`].
//! Every child is owned by exactly one parent link, so the structure can
//! never contain sharing or cycles. Freed slots are recycled by the arena;
//! the generation stamp keeps stale indices from aliasing a recycled node.

use std::cmp::Ordering;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::traversal::{InOrderIter, Order, PostOrderIter, PreOrderIter, Traversal};

/// Ephemeral presentation state attached to every node.
///
/// Recomputed on each render pass and never consulted by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decoration {
    /// Horizontal canvas position of the node centre
    pub x: f64,
    /// Vertical canvas position of the node centre
    pub y: f64,
    /// Part of the currently animated path or traversal step
    pub highlighted: bool,
    /// Target of a successful lookup
    pub found: bool,
}

/// Tree node in the arena-based BST.
#[derive(Debug)]
pub struct BstNode {
    /// The key stored in this node; unique within the tree
    pub value: i64,
    /// Index of the left child (all smaller keys)
    pub left: Option<Index>,
    /// Index of the right child (all larger keys)
    pub right: Option<Index>,
    /// Presentation decoration, not part of the node's identity
    pub decoration: Decoration,
}

impl BstNode {
    fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
            decoration: Decoration::default(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for BstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Result of descending the tree looking for a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    pub found: bool,
    /// Root-to-node path; when the value is absent this ends at the last
    /// node visited before the descent fell off the tree.
    pub path: Vec<Index>,
}

/// Arena-backed binary search tree.
///
/// Invariant: for every node, all keys in the left subtree are strictly
/// smaller and all keys in the right subtree strictly larger.
#[derive(Debug)]
pub struct BstArena {
    arena: Arena<BstNode>,
    root: Option<Index>,
}

impl Default for BstArena {
    fn default() -> Self {
        Self::new()
    }
}

impl BstArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Build a tree by inserting `values` in order; duplicates are skipped.
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = Self::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn get_node(&self, idx: Index) -> Option<&BstNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut BstNode> {
        self.arena.get_mut(idx)
    }

    /// Value stored at `idx`, if the index is still live.
    pub fn value_of(&self, idx: Index) -> Option<i64> {
        self.arena.get(idx).map(|node| node.value)
    }

    /// Drop every node and reset to the empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Insert `value`, returning `false` if it is already present.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, value: i64) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(BstNode::new(value)));
            debug!(value, "inserted as root");
            return true;
        };

        loop {
            let node = &self.arena[current];
            let next = match value.cmp(&node.value) {
                Ordering::Equal => {
                    debug!(value, "duplicate rejected");
                    return false;
                }
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };

            match next {
                Some(child) => current = child,
                None => {
                    let idx = self.arena.insert(BstNode::new(value));
                    let parent = &mut self.arena[current];
                    if value < parent.value {
                        parent.left = Some(idx);
                    } else {
                        parent.right = Some(idx);
                    }
                    debug!(value, parent = parent.value, "inserted");
                    return true;
                }
            }
        }
    }

    /// Descend towards `value`, recording every node visited.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, value: i64) -> SearchPath {
        let mut path = Vec::new();
        let mut cursor = self.root;

        while let Some(idx) = cursor {
            path.push(idx);
            let node = &self.arena[idx];
            cursor = match value.cmp(&node.value) {
                Ordering::Equal => return SearchPath { found: true, path },
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }

        SearchPath { found: false, path }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.search(value).found
    }

    /// Remove `value`, returning whether a node was actually removed.
    ///
    /// A node with two children takes over the value of its in-order
    /// successor, which is then unlinked from the right subtree instead.
    #[instrument(level = "trace", skip(self))]
    pub fn delete(&mut self, value: i64) -> bool {
        let mut parent = None;
        let mut cursor = self.root;
        let mut target = loop {
            let Some(idx) = cursor else {
                return false;
            };
            let node = &self.arena[idx];
            cursor = match value.cmp(&node.value) {
                Ordering::Equal => break idx,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            parent = Some(idx);
        };

        if let (Some(_), Some(right)) = (self.arena[target].left, self.arena[target].right) {
            let mut successor_parent = target;
            let mut successor = right;
            while let Some(left) = self.arena[successor].left {
                successor_parent = successor;
                successor = left;
            }
            let successor_value = self.arena[successor].value;
            self.arena[target].value = successor_value;
            parent = Some(successor_parent);
            target = successor;
        }

        // at most one child left here
        let child = {
            let node = &self.arena[target];
            node.left.or(node.right)
        };
        self.relink(parent, target, child);
        self.arena.remove(target);
        debug!(value, "deleted");
        true
    }

    /// Point whatever referenced `old` (its parent or the root) at `new`.
    fn relink(&mut self, parent: Option<Index>, old: Index, new: Option<Index>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = &mut self.arena[parent];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
        }
    }

    fn leftmost(&self, mut idx: Index) -> Index {
        while let Some(left) = self.arena[idx].left {
            idx = left;
        }
        idx
    }

    fn rightmost(&self, mut idx: Index) -> Index {
        while let Some(right) = self.arena[idx].right {
            idx = right;
        }
        idx
    }

    /// Terminal node of the left spine below `subtree`.
    ///
    /// Fails only when `subtree` is absent (or no longer live).
    #[instrument(level = "trace", skip(self))]
    pub fn find_min(&self, subtree: Option<Index>) -> Result<Index, DomainError> {
        let idx = self.live(subtree)?;
        Ok(self.leftmost(idx))
    }

    /// Terminal node of the right spine below `subtree`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_max(&self, subtree: Option<Index>) -> Result<Index, DomainError> {
        let idx = self.live(subtree)?;
        Ok(self.rightmost(idx))
    }

    /// Smallest value in the whole tree.
    pub fn min_value(&self) -> Option<i64> {
        self.find_min(self.root).ok().and_then(|idx| self.value_of(idx))
    }

    /// Largest value in the whole tree.
    pub fn max_value(&self) -> Option<i64> {
        self.find_max(self.root).ok().and_then(|idx| self.value_of(idx))
    }

    fn live(&self, subtree: Option<Index>) -> Result<Index, DomainError> {
        let idx = subtree.ok_or(DomainError::EmptyTree)?;
        if self.arena.contains(idx) {
            Ok(idx)
        } else {
            Err(DomainError::UnknownNode(idx))
        }
    }

    /// Number of nodes in the tree.
    #[instrument(level = "trace", skip(self))]
    pub fn size(&self) -> usize {
        self.iter(Order::PreOrder).count()
    }

    /// Number of nodes on the deepest root-to-leaf path (0 when empty).
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    pub fn subtree_height(&self, subtree: Option<Index>) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Index, usize)> = subtree.map(|idx| (idx, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            height = height.max(depth);
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Number of nodes without children.
    #[instrument(level = "trace", skip(self))]
    pub fn count_leaves(&self) -> usize {
        self.iter(Order::PreOrder)
            .filter(|(_, node)| node.is_leaf())
            .count()
    }

    /// Values of all leaf nodes, left to right.
    pub fn leaf_values(&self) -> Vec<i64> {
        self.iter(Order::InOrder)
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.value)
            .collect()
    }

    /// Check the BST invariant over the whole tree.
    #[instrument(level = "trace", skip(self))]
    pub fn is_valid_bst(&self) -> bool {
        self.is_valid_subtree(self.root, None, None)
    }

    /// Check that every key below `subtree` lies in the open interval
    /// `(lower, upper)`; `None` leaves that side unbounded.
    pub fn is_valid_subtree(
        &self,
        subtree: Option<Index>,
        lower: Option<i64>,
        upper: Option<i64>,
    ) -> bool {
        let mut stack = vec![(subtree, lower, upper)];
        while let Some((cursor, lower, upper)) = stack.pop() {
            let Some(node) = cursor.and_then(|idx| self.get_node(idx)) else {
                continue;
            };
            if lower.is_some_and(|lo| node.value <= lo) || upper.is_some_and(|hi| node.value >= hi)
            {
                return false;
            }
            stack.push((node.left, lower, Some(node.value)));
            stack.push((node.right, Some(node.value), upper));
        }
        true
    }

    /// Walk the tree in the given order.
    pub fn iter(&self, order: Order) -> Box<dyn Iterator<Item = (Index, &BstNode)> + '_> {
        match order {
            Order::InOrder => Box::new(InOrderIter::new(self)),
            Order::PreOrder => Box::new(PreOrderIter::new(self)),
            Order::PostOrder => Box::new(PostOrderIter::new(self)),
        }
    }

    /// Full traversal in one call: values and node indices in visiting order.
    #[instrument(level = "trace", skip(self))]
    pub fn traverse(&self, order: Order) -> Traversal {
        let (nodes, values): (Vec<Index>, Vec<i64>) = self
            .iter(order)
            .map(|(idx, node)| (idx, node.value))
            .unzip();
        Traversal { values, nodes }
    }

    pub fn inorder(&self) -> Traversal {
        self.traverse(Order::InOrder)
    }

    pub fn preorder(&self) -> Traversal {
        self.traverse(Order::PreOrder)
    }

    pub fn postorder(&self) -> Traversal {
        self.traverse(Order::PostOrder)
    }

    /// Reset highlight state on every node; positions are kept.
    pub fn clear_decorations(&mut self) {
        for (_, node) in self.arena.iter_mut() {
            node.decoration.highlighted = false;
            node.decoration.found = false;
        }
    }
}
