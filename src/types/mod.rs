//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `book`: book records and request provenance
//! - `loan`: loan lifecycle, receipts, and report rows
//! - `error`: error types for the loan engine

pub mod book;
pub mod error;
pub mod loan;

pub use book::{BookId, BookRecord, LoanRequest, Provenance};
pub use error::LibraryError;
pub use loan::{Loan, LoanStatus, ReportRow, ReturnReceipt, LATE_FEE_PER_DAY, STANDARD_TERM_DAYS};
