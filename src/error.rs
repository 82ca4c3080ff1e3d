//! Error types for the registrar
//!
//! `StoreError` covers the storage, log and transport plumbing.
//! `RecordError` is the business taxonomy raised inside handlers, and
//! `OperationError` is what a handler hands back to its caller.

use std::fmt;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for storage and transport operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // WAL Errors
    // -------------------------------------------------------------------------
    #[error("WAL corruption detected: {0}")]
    WalCorruption(String),

    #[error("WAL write failed: {0}")]
    WalWrite(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Failures raised while executing a handler
#[derive(Debug, Error)]
pub enum RecordError {
    /// A required input field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// Credit cap exceeded, already paid, insufficient payment
    #[error("{0}")]
    BusinessRule(String),

    /// A referenced id is absent from its store
    #[error("The {entity} with id={id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RecordError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        RecordError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Operations whose failures are reported with a prefixed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateStudent,
    CreateCourse,
    Payment,
    AddCourseStudent,
}

impl Operation {
    /// Prefix placed in front of every failure message of this operation
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Operation::CreateStudent => "Error Creating Student",
            Operation::CreateCourse => "Error Creating Course",
            Operation::Payment => "Error Payment",
            Operation::AddCourseStudent => "Error Exchange",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_prefix())
    }
}

/// A failed handler invocation
///
/// Renders as `<prefix> [Error: <cause>]`, e.g.
/// `Error Creating Student [Error: Name/Semester must be added]`.
#[derive(Debug, Error)]
#[error("{operation} [Error: {source}]")]
pub struct OperationError {
    pub operation: Operation,
    #[source]
    pub source: RecordError,
}

impl OperationError {
    pub fn new(operation: Operation, source: RecordError) -> Self {
        Self { operation, source }
    }

    /// The underlying cause without the operation prefix
    pub fn cause(&self) -> &RecordError {
        &self.source
    }
}
