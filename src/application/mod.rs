//! Application layer: query grammar, evaluation and session state
//!
//! This layer orchestrates the domain engine and depends on the presentation boundary trait.

pub mod command;
pub mod error;
pub mod history;
pub mod sequencer;
pub mod session;

pub use command::{parse, Command, SHAPES};
pub use error::{ApplicationError, ApplicationResult, CommandError};
pub use history::{History, HISTORY_LIMIT};
pub use sequencer::{Animation, AnimationKind, Sequencer, Step, Ticket, Timing};
pub use session::{Outcome, Session, Verdict};
