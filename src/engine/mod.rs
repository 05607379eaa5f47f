//! Remote engine boundary.
//!
//! The index/query engine is an external collaborator; these modules hold
//! its request/response contract and a blocking client for it. Nothing else
//! in the crate opens a socket.

pub mod client;
pub mod protocol;

pub use client::{EngineClient, EngineError, EngineResult};
