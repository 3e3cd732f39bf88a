//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Engine preconditions that cannot be expressed as a plain boolean answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tree is empty")]
    EmptyTree,

    #[error("node {0:?} is no longer part of the tree")]
    UnknownNode(Index),
}
