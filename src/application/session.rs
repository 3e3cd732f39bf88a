//! Query evaluation against one owned tree.
//!
//! A [`Session`] owns the tree, its query history and the animation
//! sequencer. Every query is applied to the tree completely before its
//! [`Outcome`] is returned; any animation is played afterwards over the
//! already-final tree.

use std::io;
use std::thread;

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::command::{self, Command, Extreme, Metric};
use crate::application::error::CommandError;
use crate::application::history::History;
use crate::application::sequencer::{Animation, Sequencer, Step, Ticket, Timing};
use crate::domain::BstArena;
use crate::infrastructure::traits::Presenter;

/// Logical answer of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The query ran and holds
    True,
    /// The query ran and its answer is no
    False,
    /// The query could not run
    Failed(CommandError),
}

/// Structured result of evaluating one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    /// Transcript body: `true.`, `false.` or `Error: ...`, then details
    pub body: String,
    /// The tree structure was mutated
    pub tree_changed: bool,
    /// Nodes to play back as a highlight animation
    pub animation: Option<Animation>,
}

impl Outcome {
    fn holds(details: impl AsRef<str>) -> Self {
        Self {
            verdict: Verdict::True,
            body: format!("true.\n\n{}", details.as_ref()),
            tree_changed: false,
            animation: None,
        }
    }

    fn fails(details: impl AsRef<str>) -> Self {
        Self {
            verdict: Verdict::False,
            body: format!("false.\n\n{}", details.as_ref()),
            tree_changed: false,
            animation: None,
        }
    }

    pub fn error(err: CommandError) -> Self {
        let body = match err {
            CommandError::UnknownCommand => {
                format!("Error: {}\n\n{}", err, command::supported_queries())
            }
            _ => format!("Error: {}", err),
        };
        Self {
            verdict: Verdict::Failed(err),
            body,
            tree_changed: false,
            animation: None,
        }
    }

    fn changed(mut self) -> Self {
        self.tree_changed = true;
        self
    }

    fn animated(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// `true` only when the query ran and holds.
    pub fn is_success(&self) -> bool {
        self.verdict == Verdict::True
    }

    /// `true` when the query could not run at all.
    pub fn is_error(&self) -> bool {
        matches!(self.verdict, Verdict::Failed(_))
    }
}

/// Owning context for one interactive session.
#[derive(Debug, Default)]
pub struct Session {
    tree: BstArena,
    history: History,
    sequencer: Sequencer,
}

impl Session {
    pub fn new(timing: Timing) -> Self {
        Self {
            tree: BstArena::new(),
            history: History::new(),
            sequencer: Sequencer::new(timing),
        }
    }

    pub fn tree(&self) -> &BstArena {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut BstArena {
        &mut self.tree
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Evaluate one line of input.
    ///
    /// Non-empty input is recorded in the history whatever its outcome.
    /// Any animation still in flight is cancelled first.
    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, line: &str) -> Outcome {
        let query = line.trim();
        if query.is_empty() {
            return Outcome::error(CommandError::EmptyInput);
        }
        self.history.push(query);
        self.sequencer.cancel();
        self.tree.clear_decorations();

        let outcome = match command::parse(query) {
            Ok(command) => self.apply(command),
            Err(err) => Outcome::error(err),
        };
        debug!(verdict = ?outcome.verdict, changed = outcome.tree_changed, "evaluated");
        outcome
    }

    fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Clear => {
                self.tree.clear();
                info!("tree cleared");
                Outcome::holds("Tree cleared.").changed()
            }
            Command::BuildTree { values, tree } => {
                self.tree.clear();
                for &value in &values {
                    self.tree.insert(value);
                }
                let root = self
                    .tree
                    .root()
                    .and_then(|idx| self.tree.value_of(idx))
                    .map_or_else(String::new, |value| value.to_string());
                info!(size = self.tree.size(), "tree built");
                Outcome::holds(format!(
                    "Tree built with values: [{}]\n{} = tree({}, ...)",
                    values.iter().join(", "),
                    tree,
                    root
                ))
                .changed()
            }
            Command::Insert { value, tree } => {
                if self.tree.insert(value) {
                    Outcome::holds(format!("Inserted {value} into tree.\n{tree} = tree(...)"))
                        .changed()
                } else {
                    Outcome::fails(format!("Value {value} already in tree."))
                }
            }
            Command::Delete { value, tree } => {
                if self.tree.delete(value) {
                    Outcome::holds(format!("Deleted {value} from tree.\n{tree} = tree(...)"))
                        .changed()
                } else {
                    Outcome::fails(format!("Value {value} not found in tree."))
                }
            }
            Command::Lookup { value } => {
                let search = self.tree.search(value);
                let outcome = if search.found {
                    Outcome::holds(format!("Value {value} found in tree!"))
                } else {
                    Outcome::fails(format!("Value {value} not found in tree."))
                };
                if search.path.is_empty() {
                    outcome
                } else {
                    outcome.animated(Animation::search_path(search.path, search.found))
                }
            }
            Command::Traverse { order, binding } => {
                let traversal = self.tree.traverse(order);
                let outcome = Outcome::holds(format!(
                    "{binding} = [{}]",
                    traversal.values.iter().join(", ")
                ));
                if traversal.is_empty() {
                    outcome
                } else {
                    outcome.animated(Animation::traversal(traversal.nodes))
                }
            }
            Command::IsValidBst => {
                if self.tree.is_valid_bst() {
                    Outcome::holds("The tree is a valid BST.")
                } else {
                    Outcome::fails("The tree is NOT a valid BST.")
                }
            }
            Command::Measure { metric, binding } => {
                let count = match metric {
                    Metric::Size => self.tree.size(),
                    Metric::Height => self.tree.height(),
                    Metric::Leaves => self.tree.count_leaves(),
                };
                Outcome::holds(format!("{binding} = {count}"))
            }
            Command::Extreme { extreme, binding } => {
                let found = match extreme {
                    Extreme::Min => self.tree.find_min(self.tree.root()),
                    Extreme::Max => self.tree.find_max(self.tree.root()),
                };
                match found.map(|idx| self.tree.value_of(idx)) {
                    Ok(Some(value)) => Outcome::holds(format!("{binding} = {value}")),
                    Ok(None) => Outcome::error(CommandError::EmptyTree),
                    Err(err) => Outcome::error(err.into()),
                }
            }
        }
    }

    /// Start `animation`, superseding any animation in flight.
    pub fn start_animation(&mut self, animation: Animation) -> Ticket {
        self.sequencer.start(animation)
    }

    /// Advance an animation by one step; see [`Sequencer::step`].
    pub fn step_animation(&mut self, ticket: &Ticket) -> Step {
        self.sequencer.step(ticket, &mut self.tree)
    }

    /// Highlight the node drawn at canvas point `(x, y)`.
    ///
    /// A hit stops any running animation and leaves the picked node as the
    /// only highlighted one. A miss changes nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn select(&mut self, x: f64, y: f64, width: f64) -> Option<i64> {
        self.tree.layout(width);
        let idx = self.tree.pick(x, y)?;
        self.sequencer.cancel();
        self.tree.clear_decorations();
        let node = self.tree.get_node_mut(idx)?;
        node.decoration.highlighted = true;
        debug!(value = node.value, "selected");
        Some(node.value)
    }

    /// Play `animation` to completion, rendering every frame.
    ///
    /// With `animate` off nothing is played and decoration is reset.
    pub fn play(
        &mut self,
        animation: Animation,
        presenter: &mut dyn Presenter,
        animate: bool,
    ) -> io::Result<()> {
        if !animate {
            self.sequencer.cancel();
            self.tree.clear_decorations();
            return Ok(());
        }

        let ticket = self.start_animation(animation);
        loop {
            match self.step_animation(&ticket) {
                Step::Frame { delay } => {
                    presenter.render(&mut self.tree)?;
                    thread::sleep(delay);
                }
                Step::Hold { delay } => thread::sleep(delay),
                Step::Finished => return presenter.render(&mut self.tree),
                Step::Cancelled => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unknown_command_when_formatting_error_then_lists_supported_queries() {
        let outcome = Outcome::error(CommandError::UnknownCommand);
        assert!(outcome.body.starts_with("Error: Unknown query or syntax error.\n\nSupported queries:"));
        assert!(outcome.is_error());
        assert!(!outcome.is_success());
    }

    #[test]
    fn given_blank_line_when_executing_then_not_recorded() {
        let mut session = Session::default();
        let outcome = session.execute("   ");
        assert_eq!(outcome.verdict, Verdict::Failed(CommandError::EmptyInput));
        assert!(session.history().is_empty());
    }
}
