//! Cancellable highlight animation.
//!
//! The sequencer is a cooperative state machine: a driver asks for the next
//! [`Step`], renders, and waits the returned delay. Starting a new animation
//! (or calling [`Sequencer::cancel`]) invalidates every earlier [`Ticket`];
//! stepping a stale ticket never touches decoration again.
//!
//! Only node decoration is written here, never tree structure.

use std::time::Duration;

use generational_arena::Index;
use tracing::{debug, trace};

use crate::domain::BstArena;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Highlight the growing root-to-node prefix; mark the last node found
    SearchPath { found: bool },
    /// Highlight one node at a time in visiting order
    Traversal,
}

/// Ordered nodes to play back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub nodes: Vec<Index>,
}

impl Animation {
    pub fn search_path(nodes: Vec<Index>, found: bool) -> Self {
        Self {
            kind: AnimationKind::SearchPath { found },
            nodes,
        }
    }

    pub fn traversal(nodes: Vec<Index>) -> Self {
        Self {
            kind: AnimationKind::Traversal,
            nodes,
        }
    }
}

/// Step and hold delays per animation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub search_step: Duration,
    pub search_hold: Duration,
    pub traversal_step: Duration,
    pub traversal_hold: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            search_step: Duration::from_millis(500),
            search_hold: Duration::from_millis(2000),
            traversal_step: Duration::from_millis(600),
            traversal_hold: Duration::from_millis(1000),
        }
    }
}

impl Timing {
    /// All delays divided by `speed`.
    pub fn scaled(self, speed: f64) -> Self {
        let scale = |d: Duration| d.div_f64(speed);
        Self {
            search_step: scale(self.search_step),
            search_hold: scale(self.search_hold),
            traversal_step: scale(self.traversal_step),
            traversal_hold: scale(self.traversal_hold),
        }
    }

    fn step(&self, kind: AnimationKind) -> Duration {
        match kind {
            AnimationKind::SearchPath { .. } => self.search_step,
            AnimationKind::Traversal => self.traversal_step,
        }
    }

    fn hold(&self, kind: AnimationKind) -> Duration {
        match kind {
            AnimationKind::SearchPath { .. } => self.search_hold,
            AnimationKind::Traversal => self.traversal_hold,
        }
    }
}

/// Handle to one started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// What the driver should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Decoration changed: render, then wait `delay`
    Frame { delay: Duration },
    /// Final pause before the highlight is cleared
    Hold { delay: Duration },
    /// Decoration cleared: render once more, then stop
    Finished,
    /// The ticket was superseded or cancelled: stop without rendering
    Cancelled,
}

#[derive(Debug)]
struct Playback {
    ticket: Ticket,
    animation: Animation,
    position: usize,
    held: bool,
}

#[derive(Debug, Default)]
pub struct Sequencer {
    generation: u64,
    timing: Timing,
    current: Option<Playback>,
}

impl Sequencer {
    pub fn new(timing: Timing) -> Self {
        Self {
            generation: 0,
            timing,
            current: None,
        }
    }

    /// Start `animation`, superseding whatever was playing.
    pub fn start(&mut self, animation: Animation) -> Ticket {
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
        };
        debug!(
            generation = self.generation,
            nodes = animation.nodes.len(),
            "animation started"
        );
        self.current = Some(Playback {
            ticket,
            animation,
            position: 0,
            held: false,
        });
        ticket
    }

    /// Invalidate the running animation, if any.
    pub fn cancel(&mut self) {
        if self.current.take().is_some() {
            debug!(generation = self.generation, "animation cancelled");
        }
    }

    pub fn is_active(&self, ticket: &Ticket) -> bool {
        self.current
            .as_ref()
            .is_some_and(|playback| playback.ticket == *ticket)
    }

    /// Advance `ticket` by one step, writing decoration into `tree`.
    pub fn step(&mut self, ticket: &Ticket, tree: &mut BstArena) -> Step {
        let Some(playback) = self
            .current
            .as_mut()
            .filter(|playback| playback.ticket == *ticket)
        else {
            trace!(?ticket, "stale ticket");
            return Step::Cancelled;
        };

        let kind = playback.animation.kind;
        let nodes = &playback.animation.nodes;
        if playback.position < nodes.len() {
            let pos = playback.position;
            tree.clear_decorations();
            match kind {
                AnimationKind::SearchPath { found } => {
                    for &idx in &nodes[..=pos] {
                        if let Some(node) = tree.get_node_mut(idx) {
                            node.decoration.highlighted = true;
                        }
                    }
                    if found && pos + 1 == nodes.len() {
                        if let Some(node) = tree.get_node_mut(nodes[pos]) {
                            node.decoration.found = true;
                        }
                    }
                }
                AnimationKind::Traversal => {
                    if let Some(node) = tree.get_node_mut(nodes[pos]) {
                        node.decoration.highlighted = true;
                    }
                }
            }
            playback.position += 1;
            return Step::Frame {
                delay: self.timing.step(kind),
            };
        }

        if !playback.held {
            playback.held = true;
            return Step::Hold {
                delay: self.timing.hold(kind),
            };
        }

        tree.clear_decorations();
        self.current = None;
        Step::Finished
    }
}
