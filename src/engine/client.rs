//! Client for the remote index engine.
//!
//! The engine owns document storage and query evaluation; this client only
//! ships encoded units to it and pulls match state back. Any failure on this
//! boundary surfaces as a single [`EngineError`] so the caller can render it
//! as a non-fatal, displayed error instead of crashing the request.

use crate::engine::protocol::{
    Document, Request, Response, SearchResults, StatResponse, read_message, write_message,
};
use crate::query::SearchQuery;
use std::collections::HashMap;
use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::time::Duration;

/// Connect/read/write timeout
const IO_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur when talking to the engine
#[derive(Debug)]
pub enum EngineError {
    /// Could not reach the engine at the configured host
    Connect(std::io::Error),
    /// Communication error mid-request
    Io(std::io::Error),
    /// The engine reported an error
    Engine(String),
    /// Response did not match the request
    InvalidResponse,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Connect(e) => write!(f, "Cannot reach index engine: {}", e),
            EngineError::Io(e) => write!(f, "I/O error: {}", e),
            EngineError::Engine(msg) => write!(f, "Engine error: {}", msg),
            EngineError::InvalidResponse => write!(f, "Invalid response from engine"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}

/// Client for the remote engine
pub struct EngineClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    index: String,
}

impl EngineClient {
    /// Connect to the engine at `host` (e.g. "127.0.0.1:3000"). All
    /// requests from this client address the named index.
    pub fn connect(host: &str, index: &str) -> EngineResult<Self> {
        let stream = TcpStream::connect(host).map_err(EngineError::Connect)?;

        let _ = stream.set_read_timeout(Some(IO_TIMEOUT));
        let _ = stream.set_write_timeout(Some(IO_TIMEOUT));

        let reader = BufReader::new(stream.try_clone().map_err(EngineError::Connect)?);
        let writer = BufWriter::new(stream);

        Ok(Self {
            reader,
            writer,
            index: index.to_string(),
        })
    }

    fn roundtrip(&mut self, request: &Request) -> EngineResult<Response> {
        write_message(&mut self.writer, request)?;
        let response: Response = read_message(&mut self.reader)?;
        match response {
            Response::Error { message } => Err(EngineError::Engine(message)),
            other => Ok(other),
        }
    }

    /// Submit a batch of documents. Returns the number the engine indexed.
    pub fn save(&mut self, documents: Vec<Document>, force_merge: bool) -> EngineResult<usize> {
        let request = Request::Save {
            index: self.index.clone(),
            documents,
            force_merge,
        };

        match self.roundtrip(&request)? {
            Response::Saved { indexed } => Ok(indexed),
            _ => Err(EngineError::InvalidResponse),
        }
    }

    /// Evaluate a query and return one page of results.
    pub fn search(&mut self, query: SearchQuery, page: usize, size: usize) -> EngineResult<SearchResults> {
        let request = Request::Search {
            index: self.index.clone(),
            query,
            page,
            size,
        };

        match self.roundtrip(&request)? {
            Response::Results(results) => Ok(results),
            _ => Err(EngineError::InvalidResponse),
        }
    }

    /// Fetch stored content hashes for incremental indexing.
    pub fn hashes(&mut self) -> EngineResult<HashMap<String, u32>> {
        let request = Request::Hashes {
            index: self.index.clone(),
        };

        match self.roundtrip(&request)? {
            Response::Hashes { hashes } => Ok(hashes),
            _ => Err(EngineError::InvalidResponse),
        }
    }

    /// Engine statistics.
    pub fn stat(&mut self) -> EngineResult<StatResponse> {
        match self.roundtrip(&Request::Stat)? {
            Response::Stat(stat) => Ok(stat),
            _ => Err(EngineError::InvalidResponse),
        }
    }
}
