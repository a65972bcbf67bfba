//! Error types for the Library Loan Engine
//!
//! This module defines all error kinds that can occur while loading ledgers,
//! mutating loan state, or writing files. Errors are descriptive and meant
//! for console display.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: ledger or report file unreadable/unwritable; fatal
//!   for the current operation only, the command loop keeps running.
//! - **Parse Errors**: a malformed ledger line; logged, the row is skipped
//!   and loading continues.
//! - **Loan State Errors**: lending from an exhausted/stale pool, returning
//!   with nothing open, reporting with nothing to report; rejected with no
//!   state change.
//! - **Request Errors**: a submission colliding with the existing catalog;
//!   rejected with no write performed.

use thiserror::Error;

/// Main error type for the loan engine
///
/// Each variant carries enough context for the console frontend to explain
/// what was rejected and why. Nothing here terminates the process; only an
/// unrecoverable bootstrap failure at startup does that, and it is surfaced
/// as `Io` from the gateway before the command loop starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    /// Ledger or report file could not be read or written
    ///
    /// Fatal for the operation that touched the file; the process continues.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the underlying I/O failure
        message: String,
    },

    /// A ledger line could not be parsed
    ///
    /// Recoverable: the row is skipped with a warning and loading continues.
    #[error("ledger parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if known)
        line: Option<u64>,
        /// Description of the parsing failure
        message: String,
    },

    /// The specific record is no longer in the available pool
    ///
    /// The only realistic cause in this single-threaded design is a stale
    /// reference from an outdated listing. No state change.
    #[error("book {id} '{title}' is no longer available")]
    NotAvailable {
        /// Id of the requested record
        id: u32,
        /// Title of the requested record
        title: String,
    },

    /// Auto-pop lending was requested but the pool is empty
    #[error("no books available to lend")]
    EmptyPool,

    /// A return was requested with no open loans
    #[error("no active loans to return")]
    NoOpenLoans,

    /// A submitted request collides with the current catalog
    ///
    /// Matches by id or by case-insensitive title. No write is performed.
    #[error("book {id} '{title}' already exists in the purchase catalog")]
    DuplicateRequest {
        /// Id of the rejected request
        id: u32,
        /// Title of the rejected request
        title: String,
    },

    /// A report was requested with empty history and no open loans
    ///
    /// No file is written.
    #[error("no loans, active or returned, to report")]
    NothingToReport,
}

impl From<std::io::Error> for LibraryError {
    fn from(error: std::io::Error) -> Self {
        LibraryError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LibraryError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LibraryError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl LibraryError {
    /// Create an Io error from a message
    pub fn io(message: impl Into<String>) -> Self {
        LibraryError::Io {
            message: message.into(),
        }
    }

    /// Create a Parse error
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        LibraryError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a NotAvailable error
    pub fn not_available(id: u32, title: &str) -> Self {
        LibraryError::NotAvailable {
            id,
            title: title.to_string(),
        }
    }

    /// Create a DuplicateRequest error
    pub fn duplicate_request(id: u32, title: &str) -> Self {
        LibraryError::DuplicateRequest {
            id,
            title: title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::io(
        LibraryError::Io { message: "permission denied".to_string() },
        "I/O error: permission denied"
    )]
    #[case::parse_with_line(
        LibraryError::Parse { line: Some(3), message: "invalid price".to_string() },
        "ledger parse error at line 3: invalid price"
    )]
    #[case::parse_without_line(
        LibraryError::Parse { line: None, message: "invalid price".to_string() },
        "ledger parse error: invalid price"
    )]
    #[case::not_available(
        LibraryError::not_available(5, "Rayuela"),
        "book 5 'Rayuela' is no longer available"
    )]
    #[case::empty_pool(LibraryError::EmptyPool, "no books available to lend")]
    #[case::no_open_loans(LibraryError::NoOpenLoans, "no active loans to return")]
    #[case::duplicate_request(
        LibraryError::duplicate_request(101, "Don Quijote"),
        "book 101 'Don Quijote' already exists in the purchase catalog"
    )]
    #[case::nothing_to_report(
        LibraryError::NothingToReport,
        "no loans, active or returned, to report"
    )]
    fn test_error_display(#[case] error: LibraryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let error: LibraryError = io_error.into();
        assert!(matches!(error, LibraryError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: file missing");
    }
}
