//! Persistence error types for score and snapshot files.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while reading or writing a persisted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StoreErrorKind {
    /// The file exists but could not be read or written.
    #[display("I/O")]
    Io,
    /// The file content is not the expected structure.
    #[display("parse")]
    Parse,
    /// The content parsed but describes an impossible state.
    #[display("validation")]
    Invalid,
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store {} error: {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// Failure category.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an [`StoreErrorKind::Io`] error.
    #[track_caller]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Io, message)
    }

    /// Shorthand for a [`StoreErrorKind::Parse`] error.
    #[track_caller]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Parse, message)
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", err))
    }
}
