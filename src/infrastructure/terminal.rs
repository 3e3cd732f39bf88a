//! Terminal presenter: colored transcripts and termtree drawings.
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::application::Outcome;
use crate::domain::BstArena;
use crate::infrastructure::render::TreeRender;
use crate::infrastructure::traits::Presenter;

/// Style one transcript line the way the query output box does.
pub fn style_line(line: &str) -> ColoredString {
    if line.starts_with("?-") {
        line.blue().bold()
    } else if line.starts_with("Error:") || line == "false." {
        line.red()
    } else if line.starts_with("true.") {
        line.green().bold()
    } else if is_binding(line) {
        line.yellow()
    } else {
        line.dimmed()
    }
}

/// `X = ...` lines: a variable name followed by `=`.
fn is_binding(line: &str) -> bool {
    line.split_once('=').is_some_and(|(name, _)| {
        let name = name.trim_end();
        name.starts_with(|c: char| c.is_ascii_uppercase())
            && name.chars().all(|c| c.is_alphanumeric() || c == '_')
    })
}

/// Draws to any writer; stdout in the CLI, a buffer in tests.
pub struct TerminalPresenter<W: Write> {
    out: W,
    width: f64,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(width: f64) -> Self {
        Self::new(io::stdout(), width)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, width: f64) -> Self {
        Self { out, width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a message that is not a query transcript.
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        for line in message.lines() {
            writeln!(self.out, "{}", line.dimmed())?;
        }
        self.out.flush()
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, tree: &mut BstArena) -> io::Result<()> {
        tree.layout(self.width);
        writeln!(self.out, "{}", tree.to_colored_tree())?;
        self.out.flush()
    }

    fn transcript(&mut self, query: &str, outcome: &Outcome) -> io::Result<()> {
        writeln!(self.out, "{}", style_line(&format!("?- {query}")))?;
        for line in outcome.body.lines() {
            writeln!(self.out, "{}", style_line(line))?;
        }
        self.out.flush()
    }
}
