//! Library Loan Engine
//! # Overview
//!
//! This library tracks a small library's book inventory, purchase requests,
//! and loan/return lifecycle, persisting records to semicolon-delimited
//! text files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (BookRecord, Loan, errors)
//! - [`cli`] - Argument parsing and the interactive console menu
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - The lending state machine: LIFO pool of available
//!     books, FIFO queue of open loans, append-only return history
//!   - [`core::validator`] - Best-effort ledger loading and the pure
//!     request/catalog reconciliation
//!   - [`core::service`] - Orchestration between validator, ledger, and
//!     persistence
//! - [`io`] - Ledger parsing, report serialization, and file persistence
//!
//! # Loan lifecycle
//!
//! A book cycles `Available → OnLoan → Available`; a loan transitions
//! `Open → Closed` exactly once. The standard term is 15 days and each day
//! beyond it accrues a 0.75 late fee, computed in exact decimal arithmetic.
//!
//! # Persistence
//!
//! Two ledgers share one on-disk shape (`;`-delimited rows with an optional
//! Spanish header): the purchase catalog, which seeds the pool at startup,
//! and the request ledger, which holds titles pending purchase. Reports are
//! written as dated CSV files. All access is single-threaded and
//! sequential; there is no cross-file transaction guarantee.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{FulfillmentSummary, LibraryService, LoanLedger, ReportOutcome};
pub use crate::io::{LedgerReader, PersistenceGateway};
pub use crate::types::{
    BookId, BookRecord, LibraryError, Loan, LoanRequest, LoanStatus, Provenance, ReportRow,
    ReturnReceipt,
};
