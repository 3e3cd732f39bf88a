use std::io;
use std::process;

use bstviz::cli::args::Cli;
use bstviz::cli::commands::execute_command;
use bstviz::cli::output;
use bstviz::exitcode;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                exitcode::USAGE
            } else {
                exitcode::OK
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        process::exit(e.exit_code());
    }
}

/// Map `-d` occurrences to a level; a set `RUST_LOG` wins over the flag.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    // The line editor logs every keystroke at debug
    let quiet_editor = filter_fn(|metadata| !metadata.target().starts_with("rustyline"));

    // Logs go to stderr so transcripts on stdout stay clean
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter)
        .with_filter(quiet_editor);

    tracing_subscriber::registry().with(fmt_layer).init();

    match level {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG | LevelFilter::TRACE => tracing::debug!(%level, "Debug mode"),
        _ => {}
    }
}
