//! Stack-based depth-first walkers over a [`BstArena`].
//!
//! Each walker keeps an explicit stack of arena indices, so degenerate
//! (list-shaped) trees never exhaust the call stack.

use std::fmt;

use generational_arena::Index;

use crate::domain::arena::{BstArena, BstNode};

/// Depth-first visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// left, value, right
    InOrder,
    /// value, left, right
    PreOrder,
    /// left, right, value
    PostOrder,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::InOrder => "inorder",
            Order::PreOrder => "preorder",
            Order::PostOrder => "postorder",
        };
        f.write_str(name)
    }
}

/// Complete result of one traversal: values and the matching node indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    pub values: Vec<i64>,
    pub nodes: Vec<Index>,
}

impl Traversal {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub struct PreOrderIter<'a> {
    tree: &'a BstArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIter<'a> {
    pub fn new(tree: &'a BstArena) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (Index, &'a BstNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                // right first so the left subtree is popped next
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current, node));
            }
        }
        None
    }
}

pub struct InOrderIter<'a> {
    tree: &'a BstArena,
    stack: Vec<Index>,
    cursor: Option<Index>,
}

impl<'a> InOrderIter<'a> {
    pub fn new(tree: &'a BstArena) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            cursor: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = (Index, &'a BstNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.cursor {
            self.stack.push(current);
            self.cursor = self.tree.get_node(current).and_then(|node| node.left);
        }
        let current = self.stack.pop()?;
        let node = self.tree.get_node(current)?;
        self.cursor = node.right;
        Some((current, node))
    }
}

pub struct PostOrderIter<'a> {
    tree: &'a BstArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIter<'a> {
    pub fn new(tree: &'a BstArena) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = (Index, &'a BstNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                self.stack.extend(node.right.map(|right| (right, false)));
                self.stack.extend(node.left.map(|left| (left, false)));
            }
        }
        None
    }
}
