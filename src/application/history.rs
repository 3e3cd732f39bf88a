//! Bounded log of submitted queries, most recent first.

use std::collections::VecDeque;

/// Maximum number of remembered queries.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query, evicting the oldest beyond [`HISTORY_LIMIT`].
    pub fn push(&mut self, query: impl Into<String>) {
        self.entries.push_front(query.into());
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Entry `n`, where 0 is the most recent.
    pub fn get(&self, n: usize) -> Option<&str> {
        self.entries.get(n).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
