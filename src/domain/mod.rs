//! Domain layer: the BST engine and its presentation geometry
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod layout;
pub mod traversal;

pub use arena::{BstArena, BstNode, Decoration, SearchPath};
pub use error::DomainError;
pub use layout::{Placement, NODE_RADIUS};
pub use traversal::{Order, Traversal};
