//! Core business logic module
//!
//! This module contains the loan lifecycle components:
//! - `ledger` - the lending state machine (pool, open loans, history)
//! - `validator` - ledger loading and request reconciliation
//! - `service` - orchestration between validator, ledger, and persistence

pub mod ledger;
pub mod service;
pub mod validator;

pub use ledger::LoanLedger;
pub use service::{FulfillmentSummary, LibraryService, ReportOutcome};
