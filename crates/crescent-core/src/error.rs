//! Crate-level error types for `crescent-core`.
//!
//! Every fallible operation in this crate returns [`CoreResult`]. External
//! service failures (vector store, embedding API, chat completion API) are
//! surfaced to the caller unmodified; no retry or circuit breaking happens
//! at this layer.

use thiserror::Error;

/// Result type used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;

/// Unified error type for the retrieval-augmented chat pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The vector store could not be reached or returned an error.
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// The embedding service call failed.
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// The language model call failed (network, rate limit, malformed response).
    #[error("Generation failed: {0}")]
    Generation(String),

    /// A caller-supplied argument was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error (missing credentials, bad endpoint, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A low-level I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
