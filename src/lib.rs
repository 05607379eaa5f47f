//! # beeline - Source-code search front end
//!
//! beeline prepares source files for a remote payload-scoring index engine
//! and renders the match state the engine returns as highlighted,
//! context-padded excerpts.
//!
//! ## Architecture
//!
//! - [`lexer`] - Per-line tokenization (word runs, operator runs, keywords)
//! - [`payload`] - The u32 token-occurrence payload codec
//! - [`unit`] - Indexable-unit builder (write path)
//! - [`matches`] - Match-state aggregation into per-line verdicts (read path)
//! - [`highlight`] - Excerpt selection, emphasis and color banding
//! - [`query`] - Query construction (content terms, `@path` terms)
//! - [`engine`] - Wire contract and client for the remote engine
//! - [`indexer`] - Directory walking and batched submission
//! - [`progress`] - Progress reporting, no-op without the `progress` feature
//! - [`output`] - Terminal result formatting
//! - [`config`] - Explicit front-end configuration
//!
//! ## Data flow
//!
//! ```text
//! file content -> lexer -> payload codec -> encoded token stream
//!     -> (remote engine stores / evaluates)
//!     -> match state -> aggregator -> per-line verdicts
//!     -> highlight renderer -> display lines
//! ```
//!
//! The engine itself (document storage, relevance evaluation) is external;
//! beeline only speaks its request/response contract.
//!
//! ## Quick start
//!
//! ```
//! use beeline::matches::{LineMatches, MatchState};
//! use beeline::{highlight, unit};
//!
//! // Write path: one file becomes one indexable unit
//! let unit = unit::build("a/b.c", b"public void run()\nint x = 1;");
//! assert!(unit.encoded_tokens.contains("run|"));
//!
//! // Read path: engine match state becomes a rendered excerpt
//! let matches = LineMatches::from_state(&MatchState::Lines(vec![0]));
//! let lines: Vec<&str> = unit.display_content.split(['\r', '\n']).collect();
//! let rendered = highlight::render(&lines, &matches, false, 2);
//! assert!(rendered[0].emphasized);
//! ```

pub mod config;
pub mod engine;
pub mod highlight;
pub mod indexer;
pub mod lexer;
pub mod matches;
pub mod output;
pub mod payload;
pub mod progress;
pub mod query;
pub mod unit;
