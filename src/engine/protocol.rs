//! Wire contract with the remote index engine.
//!
//! Length-prefixed JSON messages:
//! - 4 bytes (little-endian u32): message length
//! - N bytes: JSON-encoded message
//!
//! The engine stores each document's `display_content` verbatim and
//! tokenizes `encoded_tokens` on whitespace, splitting every term on `|`
//! into the searchable text and its integer payload.

use crate::matches::MatchState;
use crate::query::SearchQuery;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};

/// One document as submitted to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub display_content: String,
    pub encoded_tokens: String,
    pub content_hash: u32,
}

/// Request from the front end to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Store (or overwrite) a batch of documents
    Save {
        index: String,
        documents: Vec<Document>,
        force_merge: bool,
    },

    /// Evaluate a query and return per-document match state
    Search {
        index: String,
        query: SearchQuery,
        page: usize,
        size: usize,
    },

    /// Fetch stored content hashes for change detection
    Hashes { index: String },

    /// Engine statistics
    Stat,
}

/// Response from the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Documents accepted
    Saved { indexed: usize },

    /// Search results
    Results(SearchResults),

    /// Stored `id -> content_hash` pairs
    Hashes { hashes: HashMap<String, u32> },

    /// Engine statistics
    Stat(StatResponse),

    /// Error response
    Error { message: String },
}

/// Search results for one query page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total matching documents across all pages
    pub total: u64,
    /// Engine-side evaluation time in milliseconds
    pub took_ms: f64,
    /// The documents on this page
    pub hits: Vec<Hit>,
}

/// One matching document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,
    pub score: f32,
    /// The stored content, split on line terminators before rendering
    pub display_content: String,
    /// Per-document match state; shape depends on the scoring strategy
    pub match_state: MatchState,
}

/// Engine statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatResponse {
    pub docs: u64,
    pub indexes: Vec<String>,
}

/// Write a message to a stream with length prefix
pub fn write_message<W: Write>(writer: &mut W, msg: &impl Serialize) -> std::io::Result<()> {
    let json = serde_json::to_vec(msg)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let len = json.len() as u32;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&json)?;
    writer.flush()?;

    Ok(())
}

/// Read a message from a stream with length prefix
pub fn read_message<R: Read, T: for<'de> Deserialize<'de>>(reader: &mut R) -> std::io::Result<T> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    // Refuse to allocate for absurd length prefixes
    if len > 100 * 1024 * 1024 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Message too large",
        ));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    serde_json::from_slice(&buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
