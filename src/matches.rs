//! Match aggregation (read path).
//!
//! The engine reports per-document match state in one of two shapes,
//! depending on the scoring strategy it ran: raw matched line numbers, or
//! `{payload, query_token_index}` pairs. Both collapse to the same per-line
//! verdicts here so the renderer never has to care which one it got.

use crate::payload::Payload;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Per-document match state as returned by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchState {
    /// Payload-bearing state: one entry per matched posting.
    Payloads(Vec<PayloadMatch>),
    /// Presence-only state: the line numbers that matched.
    Lines(Vec<u32>),
}

/// One matched posting with the query token that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadMatch {
    pub payload: u32,
    #[serde(rename = "query-token-index")]
    pub query_token_index: u32,
}

/// Aggregated per-line verdicts for one document.
#[derive(Debug, Clone, Default)]
pub struct LineMatches {
    counts: FxHashMap<u32, usize>,
    best_count: usize,
}

impl LineMatches {
    /// Aggregate engine match state into per-line counts.
    ///
    /// In payload mode the count for a line is the number of *distinct*
    /// query tokens that matched on it; path-stream payloads are skipped
    /// since they do not refer to a displayable line. In raw-line mode
    /// every matched line counts 1.
    pub fn from_state(state: &MatchState) -> Self {
        let mut counts: FxHashMap<u32, usize> = FxHashMap::default();

        match state {
            MatchState::Lines(lines) => {
                for &line in lines {
                    counts.insert(line, 1);
                }
            }
            MatchState::Payloads(items) => {
                let mut distinct: FxHashMap<u32, FxHashSet<u32>> = FxHashMap::default();
                for item in items {
                    let decoded = Payload::decode(item.payload);
                    let Some(line) = decoded.content_line() else {
                        continue;
                    };
                    distinct.entry(line).or_default().insert(item.query_token_index);
                }
                counts = distinct
                    .into_iter()
                    .map(|(line, set)| (line, set.len()))
                    .collect();
            }
        }

        let best_count = counts.values().copied().max().unwrap_or(0);
        Self { counts, best_count }
    }

    /// Whether the line matched at all.
    pub fn matched(&self, line: u32) -> bool {
        self.counts.contains_key(&line)
    }

    /// Distinct-token count for a line (0 when unmatched).
    pub fn count(&self, line: u32) -> usize {
        self.counts.get(&line).copied().unwrap_or(0)
    }

    /// Highest distinct-token count over all lines; 0 when nothing matched.
    pub fn best_count(&self) -> usize {
        self.best_count
    }

    /// A best line matches as many distinct query tokens as any line does.
    pub fn is_best(&self, line: u32) -> bool {
        self.matched(line) && self.count(line) == self.best_count
    }

    /// Number of matched lines.
    pub fn matched_lines(&self) -> usize {
        self.counts.len()
    }
}
