//! Error types for database loading.

use thiserror::Error;

/// Errors that can occur when loading a definition file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Two definition files claim the same id.
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: String, id: u32 },
}
