//! CLI command implementations

use std::fs;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{Outcome, Session};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::repl;
use crate::config::{expand_path, Settings};
use crate::infrastructure::{Presenter, TerminalPresenter};

/// Execute the CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.no_animate {
        settings.animation.enabled = false;
    }
    debug!(?settings, "effective settings");

    match &cli.command {
        None | Some(Commands::Repl) => repl::run(&settings),
        Some(Commands::Run { queries }) => cmd_run(&settings, queries),
        Some(Commands::Script { file }) => cmd_script(&settings, file),
        Some(Commands::Config) => cmd_config(&settings),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

/// Evaluate one query: transcript first, then the tree if it changed, then
/// any animation over the final tree.
pub fn evaluate(
    session: &mut Session,
    presenter: &mut dyn Presenter,
    query: &str,
    animate: bool,
) -> io::Result<Outcome> {
    let mut outcome = session.execute(query);
    presenter.transcript(query, &outcome)?;
    if outcome.tree_changed {
        presenter.render(session.tree_mut())?;
    }
    if let Some(animation) = outcome.animation.take() {
        session.play(animation, presenter, animate)?;
    }
    Ok(outcome)
}

/// Select the node drawn at `(x, y)` on a canvas `width` wide and redraw the
/// tree with it highlighted. Returns the selected value, if any.
pub fn select(
    session: &mut Session,
    presenter: &mut dyn Presenter,
    x: f64,
    y: f64,
    width: f64,
) -> io::Result<Option<i64>> {
    let selected = session.select(x, y, width);
    if selected.is_some() {
        presenter.render(session.tree_mut())?;
    }
    Ok(selected)
}

/// Evaluate `queries` in order.
///
/// Returns `(failed, total)`, counting queries that could not be evaluated.
pub fn evaluate_all<'a>(
    session: &mut Session,
    presenter: &mut dyn Presenter,
    queries: impl IntoIterator<Item = &'a str>,
    animate: bool,
) -> io::Result<(usize, usize)> {
    let (mut failed, mut total) = (0, 0);
    for query in queries {
        total += 1;
        if evaluate(session, presenter, query, animate)?.is_error() {
            failed += 1;
        }
    }
    Ok((failed, total))
}

/// Lines of a query script, without blank lines and `%` comments.
pub fn script_queries(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('%'))
}

fn finish(failed: usize, total: usize) -> CliResult<()> {
    if failed > 0 {
        return Err(CliError::QueriesFailed { failed, total });
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_run(settings: &Settings, queries: &[String]) -> CliResult<()> {
    let mut session = Session::new(settings.animation.timing());
    let mut presenter = TerminalPresenter::stdout(settings.canvas.width);
    let (failed, total) = evaluate_all(
        &mut session,
        &mut presenter,
        queries.iter().map(String::as_str),
        settings.animation.enabled,
    )?;
    output::header("Final tree");
    presenter.render(session.tree_mut())?;
    finish(failed, total)
}

#[instrument(skip(settings))]
fn cmd_script(settings: &Settings, file: &Path) -> CliResult<()> {
    let path = expand_path(file);
    let content = fs::read_to_string(&path).map_err(|source| CliError::Input {
        path: path.clone(),
        source,
    })?;

    let mut session = Session::new(settings.animation.timing());
    let mut presenter = TerminalPresenter::stdout(settings.canvas.width);
    let (failed, total) = evaluate_all(
        &mut session,
        &mut presenter,
        script_queries(&content),
        settings.animation.enabled,
    )?;
    debug!(failed, total, "script done");
    finish(failed, total)
}

fn cmd_config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_script_with_comments_when_splitting_then_only_queries_remain() {
        let content = "% setup\nbuild_tree([2,1,3], T).\n\n   \n  % check\ninorder(T, L)\n";
        let queries: Vec<_> = script_queries(content).collect();
        assert_eq!(queries, vec!["build_tree([2,1,3], T).", "inorder(T, L)"]);
    }

    #[test]
    fn given_no_failures_when_finishing_then_ok() {
        assert!(finish(0, 3).is_ok());
        assert!(matches!(
            finish(2, 3),
            Err(CliError::QueriesFailed { failed: 2, total: 3 })
        ));
    }
}
