//! bstviz: an interactive binary search tree visualizer
//!
//! Queries in a small Prolog-like grammar (`insert(5, T)`, `inorder(T, L)`, ...)
//! drive a binary search tree; every query answers with a transcript and the
//! tree is redrawn, with search paths and traversals played as highlight
//! animations.
//!
//! # Architecture
//!
//! - `domain`: the tree engine on a generational arena, traversals and layout
//! - `application`: query grammar, session evaluation, history and the animation sequencer
//! - `infrastructure`: the presenter boundary and its terminal implementation
//! - `cli`: command-line interface and interactive prompt
//! - `config`: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
