//! Presentation boundary traits
//!
//! The session drives a [`Presenter`] without knowing how it draws,
//! allowing evaluation to be tested with recording implementations.

use std::io;

use crate::application::Outcome;
use crate::domain::BstArena;

/// Presentation adapter fed by the session.
pub trait Presenter {
    /// Lay the tree out and draw it, including its current decoration.
    fn render(&mut self, tree: &mut BstArena) -> io::Result<()>;

    /// Show the transcript of one evaluated query.
    fn transcript(&mut self, query: &str, outcome: &Outcome) -> io::Result<()>;
}
