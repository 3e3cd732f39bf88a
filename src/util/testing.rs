//! Test support: one-shot tracing setup and a recording presenter.

use std::env;
use std::io;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::Outcome;
use crate::domain::{BstArena, Order};
use crate::infrastructure::Presenter;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Line editor internals are not interesting in test output
    let noisy_modules = ["rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// What a [`RecordingPresenter`] saw for one rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Values in pre-order
    pub values: Vec<i64>,
    pub highlighted: Vec<i64>,
    pub found: Vec<i64>,
}

/// Presenter that keeps every transcript and frame instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub transcripts: Vec<(String, String)>,
    pub frames: Vec<Frame>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, tree: &mut BstArena) -> io::Result<()> {
        let mut frame = Frame {
            values: Vec::new(),
            highlighted: Vec::new(),
            found: Vec::new(),
        };
        for (_, node) in tree.iter(Order::PreOrder) {
            frame.values.push(node.value);
            if node.decoration.highlighted {
                frame.highlighted.push(node.value);
            }
            if node.decoration.found {
                frame.found.push(node.value);
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    fn transcript(&mut self, query: &str, outcome: &Outcome) -> io::Result<()> {
        self.transcripts.push((query.to_string(), outcome.body.clone()));
        Ok(())
    }
}
