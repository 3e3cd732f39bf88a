//! Canvas layout and hit-testing over node decorations.
//!
//! Root centred horizontally, fixed vertical step per level, horizontal
//! spacing halved at every depth.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::BstArena;
use crate::domain::traversal::Order;

/// Radius of a drawn node; also the hit-test radius.
pub const NODE_RADIUS: f64 = 25.0;
/// Vertical position of the root.
pub const TOP_MARGIN: f64 = 50.0;
/// Vertical distance between levels.
pub const LEVEL_SPACING: f64 = 80.0;
/// Upper bound for the root's child offset.
pub const MAX_INITIAL_SPACING: f64 = 150.0;

/// A laid-out node, for listing positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub value: i64,
    pub x: f64,
    pub y: f64,
}

impl BstArena {
    /// Assign canvas positions for a canvas `width` pixels wide.
    #[instrument(level = "trace", skip(self))]
    pub fn layout(&mut self, width: f64) {
        let Some(root) = self.root() else {
            return;
        };
        let spacing = (width / 4.0).min(MAX_INITIAL_SPACING);
        let mut pending = vec![(root, width / 2.0, TOP_MARGIN, spacing)];

        while let Some((idx, x, y, spacing)) = pending.pop() {
            let Some(node) = self.get_node_mut(idx) else {
                continue;
            };
            node.decoration.x = x;
            node.decoration.y = y;

            let next_y = y + LEVEL_SPACING;
            if let Some(right) = node.right {
                pending.push((right, x + spacing, next_y, spacing / 2.0));
            }
            if let Some(left) = node.left {
                pending.push((left, x - spacing, next_y, spacing / 2.0));
            }
        }
    }

    /// Node whose drawn circle contains the point, first match in pre-order.
    pub fn pick(&self, x: f64, y: f64) -> Option<Index> {
        self.iter(Order::PreOrder)
            .find(|(_, node)| {
                let dx = node.decoration.x - x;
                let dy = node.decoration.y - y;
                dx.hypot(dy) <= NODE_RADIUS
            })
            .map(|(idx, _)| idx)
    }

    /// Current positions in pre-order.
    pub fn placements(&self) -> Vec<Placement> {
        self.iter(Order::PreOrder)
            .map(|(_, node)| Placement {
                value: node.value,
                x: node.decoration.x,
                y: node.decoration.y,
            })
            .collect()
    }
}
