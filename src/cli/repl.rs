//! Interactive query prompt on rustyline.
//!
//! Lines starting with `:` are meta-commands; everything else is a query.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, instrument};

use crate::application::{command, Session};
use crate::cli::commands::{evaluate, select};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::TerminalPresenter;

pub const PROMPT: &str = "?- ";

const WELCOME: &str = "Welcome to BST Prolog Visualizer!
Type a query to get started, or :help for the list.

Example: build_tree([50,30,70,20,40,60,80], T)";

const META_HELP: &str = "Meta-commands:
- :history          recent queries, 0 is the most recent
- :redo N           evaluate history entry N again
- :pick X Y         select and highlight the node at canvas point (X, Y)
- :layout           canvas position of every node
- :help             this list
- :quit             leave";

/// Prompt commands outside the query grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Meta {
    History,
    Redo(usize),
    Pick { x: f64, y: f64 },
    Layout,
    Help,
    Quit,
}

/// Parse the text after the leading `:`.
pub fn parse_meta(input: &str) -> Result<Meta, String> {
    let mut words = input.split_whitespace();
    let name = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    match (name.as_str(), args.as_slice()) {
        ("history" | "h", []) => Ok(Meta::History),
        ("redo" | "r", [n]) => n
            .parse()
            .map(Meta::Redo)
            .map_err(|_| format!("not a history index: {n}")),
        ("pick" | "p", [x, y]) => match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => Ok(Meta::Pick { x, y }),
            _ => Err(format!("not a canvas point: {x} {y}")),
        },
        ("layout" | "l", []) => Ok(Meta::Layout),
        ("help" | "?", []) => Ok(Meta::Help),
        ("quit" | "q" | "exit", []) => Ok(Meta::Quit),
        ("redo" | "r", _) => Err("usage: :redo N".to_string()),
        ("pick" | "p", _) => Err("usage: :pick X Y".to_string()),
        _ => Err(format!("unknown meta-command ':{input}', try :help")),
    }
}

/// Run the interactive prompt until `:quit`, Ctrl-C or Ctrl-D.
#[instrument(skip(settings))]
pub fn run(settings: &Settings) -> CliResult<()> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new(settings.animation.timing());
    let mut presenter = TerminalPresenter::stdout(settings.canvas.width);
    let animate = settings.animation.enabled;

    presenter.notice(WELCOME)?;
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(line)?;

        let Some(meta) = line.strip_prefix(':') else {
            evaluate(&mut session, &mut presenter, line, animate)?;
            continue;
        };
        match parse_meta(meta) {
            Ok(Meta::Quit) => break,
            Ok(Meta::History) => {
                output::header("History");
                for (n, query) in session.history().entries().enumerate() {
                    output::numbered(n, query);
                }
            }
            Ok(Meta::Redo(n)) => match session.history().get(n).map(str::to_owned) {
                Some(query) => {
                    debug!(n, %query, "redo");
                    evaluate(&mut session, &mut presenter, &query, animate)?;
                }
                None => output::warning(&format!("no history entry {n}")),
            },
            Ok(Meta::Pick { x, y }) => {
                match select(&mut session, &mut presenter, x, y, settings.canvas.width)? {
                    Some(value) => output::info(&format!("Selected node: {value}")),
                    None => output::info(&format!("No node at ({x}, {y})")),
                }
            }
            Ok(Meta::Layout) => {
                let tree = session.tree_mut();
                tree.layout(settings.canvas.width);
                output::header(&format!("Layout (width {})", settings.canvas.width));
                for p in tree.placements() {
                    output::detail(&format!("{:>6}  x={:<8} y={}", p.value, p.x, p.y));
                }
            }
            Ok(Meta::Help) => {
                output::info(&command::supported_queries());
                output::info(META_HELP);
            }
            Err(msg) => output::warning(&msg),
        }
    }
    Ok(())
}
