//! Error types for the source document model

use thiserror::Error;

/// Errors raised while building or querying the source document model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceModelError {
    /// A required input is missing or malformed; raised before any processing starts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
