//! Parse run metrics.
//!
//! `Parser::run` is the hot path and records nothing. `Parser::run_with_metrics`
//! additionally returns a `RunMetrics` describing what the scan matched and
//! where, which the verbose API and the CLI report use.

use std::ops::Range;
use std::time::Duration;

/// One event reported to the sink during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord<A> {
    /// Byte range of the matched text in the input.
    pub span: Range<usize>,
    pub kind: MatchKind<A>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind<A> {
    /// A single named action.
    Action(A),
    /// The `*` wildcard.
    All,
}

#[derive(Debug, Clone)]
pub struct RunMetrics<A> {
    /// Total elapsed time for the scan.
    pub total: Duration,
    /// Every match, in input order.
    pub matches: Vec<MatchRecord<A>>,
    /// Number of empty segments (`,,`) skipped.
    pub empty_segments: usize,
}

impl<A> Default for RunMetrics<A> {
    fn default() -> Self {
        RunMetrics { total: Duration::ZERO, matches: Vec::new(), empty_segments: 0 }
    }
}

impl<A> RunMetrics<A> {
    /// Whether the run saw the wildcard.
    pub fn wildcard(&self) -> bool {
        self.matches.iter().any(|m| matches!(m.kind, MatchKind::All))
    }
}
