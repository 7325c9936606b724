//! Error types for the game server
//!
//! Covers the failures that end a single connection. None of them are fatal
//! to the process: the accept loop logs them and keeps serving.

use thiserror::Error;

/// Errors that can occur while serving a connection
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A message could not be encoded or decoded
    #[error("Invalid message: {0}")]
    Json(#[from] serde_json::Error),

    /// Another connected player already uses this name
    #[error("Name {name:?} is already taken")]
    NameTaken { name: String },

    /// The first message on a connection was not a hello
    #[error("Expected hello message, got: {received}")]
    HandshakeExpected { received: String },

    /// Peer sent more than `limit` bytes without a newline
    #[error("Line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    /// Peer closed the connection before saying hello
    #[error("Connection closed before handshake")]
    ConnectionClosed,
}

/// Result type alias for server operations
pub type ServerResult<T> = Result<T, ServerError>;
