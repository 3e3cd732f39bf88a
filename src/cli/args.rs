//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Interactive binary search tree visualizer driven by Prolog-style queries
#[derive(Parser, Debug)]
#[command(name = "bstviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Skip highlight animations
    #[arg(long, global = true)]
    pub no_animate: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive query prompt (default)
    Repl,

    /// Evaluate queries in order against a fresh tree
    Run {
        /// Queries, e.g. 'build_tree([50,30,70], T)' 'inorder(T, L)'
        #[arg(required = true)]
        queries: Vec<String>,
    },

    /// Evaluate queries from a file, one per line ('%' starts a comment)
    Script {
        /// Query file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the effective settings as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
