//! Error types for sigcipher

use thiserror::Error;

/// Main error type for sigcipher operations
///
/// None of these are retryable at this layer. A `PatternNotFound` or
/// `UnknownOperationShape` means the upstream script format drifted; the
/// right reaction is to fetch a newer script asset, which belongs to the
/// retrieval layer, not here.
#[derive(Debug, Clone, Error)]
pub enum CipherError {
    #[error("Required pattern not found at stage: {0}")]
    PatternNotFound(&'static str),

    #[error("Operation definition matches no known shape: {0}")]
    UnknownOperationShape(String),

    #[error("Plan references an operation absent from the table: {0}")]
    UnknownOperationName(String),

    #[error("Malformed transform call: {0}")]
    MalformedCall(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
