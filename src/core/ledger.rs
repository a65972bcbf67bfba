//! Loan ledger: the core lending state machine
//!
//! This module provides the LoanLedger that owns the pool of lendable
//! books, the queue of in-flight loans, and the history of completed loans.
//!
//! The ledger enforces the system invariants:
//! - A book is a member of exactly one of {available pool, some open loan}
//!   at any observation point, never both, never neither once seeded
//! - Open loans are returned in the order they were opened (FIFO)
//! - A closed loan never reopens; history is append-only in return order
//!
//! The pool is LIFO: the most recently added book (seeded last, fulfilled
//! last, or just returned) sits on top and is the next auto-pop candidate.
//! Explicit-choice lending removes by equality and is independent of pool
//! order.

use crate::types::{BookRecord, LibraryError, Loan, ReportRow, ReturnReceipt};
use chrono::NaiveDate;
use std::collections::VecDeque;

/// Core lending state machine
///
/// Owns all three collections exclusively. Every operation runs to
/// completion before the next is accepted; a rejected operation leaves the
/// state untouched.
#[derive(Debug, Default)]
pub struct LoanLedger {
    /// LIFO pool of books not currently lent out; the tail is the top
    available: Vec<BookRecord>,

    /// Open loans in creation order; the front is the earliest-opened
    open_loans: VecDeque<Loan>,

    /// Closed loans in return order, append-only
    history: Vec<Loan>,
}

impl LoanLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        LoanLedger::default()
    }

    /// Bulk-load the available pool
    ///
    /// Replaces the pool with `records` in input order, so the last input
    /// record becomes the top of the LIFO pool. Open loans and history are
    /// not affected; callers use this exactly once at startup, and calling
    /// it again simply swaps the pool.
    pub fn seed(&mut self, records: Vec<BookRecord>) {
        self.available = records;
    }

    /// Push one book onto the top of the pool
    ///
    /// Used when fulfilled requests enter circulation after the initial
    /// seed.
    pub fn add_available(&mut self, record: BookRecord) {
        self.available.push(record);
    }

    /// Snapshot of the pool in its current order (bottom to top)
    ///
    /// Does not mutate state; callers resolve a selection against this
    /// listing and then lend by record, not by position.
    pub fn list_available(&self) -> &[BookRecord] {
        &self.available
    }

    /// Number of open loans
    pub fn open_loan_count(&self) -> usize {
        self.open_loans.len()
    }

    /// Number of closed loans in the history
    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    /// Lend a specific book to `borrower_id`, dated `today`
    ///
    /// The record is matched by equality anywhere in the pool, not by
    /// position: the caller resolved its selection against an earlier
    /// listing, and the pool may have shifted since. On success the new
    /// loan joins the tail of the open-loan queue.
    ///
    /// # Errors
    ///
    /// `NotAvailable` if the record is no longer in the pool (a stale
    /// reference from an outdated listing). No state change.
    pub fn lend(
        &mut self,
        record: &BookRecord,
        borrower_id: &str,
        today: NaiveDate,
    ) -> Result<Loan, LibraryError> {
        let position = self
            .available
            .iter()
            .position(|candidate| candidate == record)
            .ok_or_else(|| LibraryError::not_available(record.id, &record.title))?;

        let book = self.available.remove(position);
        let loan = Loan::open(book, borrower_id.to_string(), today);
        self.open_loans.push_back(loan.clone());
        Ok(loan)
    }

    /// Lend the top of the pool to `borrower_id`, dated `today`
    ///
    /// The auto-pop variant for a frontend that does not offer a choice of
    /// title: pops the most recently added record (LIFO).
    ///
    /// # Errors
    ///
    /// `EmptyPool` if nothing is available. No state change.
    pub fn lend_next(
        &mut self,
        borrower_id: &str,
        today: NaiveDate,
    ) -> Result<Loan, LibraryError> {
        let book = self.available.pop().ok_or(LibraryError::EmptyPool)?;
        let loan = Loan::open(book, borrower_id.to_string(), today);
        self.open_loans.push_back(loan.clone());
        Ok(loan)
    }

    /// Close the earliest-opened loan as of `today`
    ///
    /// Dequeues the front of the open-loan queue (FIFO), records the return
    /// date, computes days late and fine, appends the closed loan to the
    /// history, and pushes its book back onto the top of the pool.
    ///
    /// # Errors
    ///
    /// `NoOpenLoans` if nothing is open. No state change.
    pub fn return_loan(&mut self, today: NaiveDate) -> Result<ReturnReceipt, LibraryError> {
        let mut loan = self.open_loans.pop_front().ok_or(LibraryError::NoOpenLoans)?;
        loan.close(today);

        let receipt = ReturnReceipt::for_loan(&loan);
        self.available.push(loan.book.clone());
        self.history.push(loan);
        Ok(receipt)
    }

    /// Produce the general loan report
    ///
    /// One row per closed loan in return order, followed by one row per
    /// open loan in loan order. Active rows carry not-applicable sentinels
    /// instead of zero fines.
    ///
    /// # Errors
    ///
    /// `NothingToReport` when both collections are empty; no rows are
    /// produced.
    pub fn report(&self) -> Result<Vec<ReportRow>, LibraryError> {
        if self.history.is_empty() && self.open_loans.is_empty() {
            return Err(LibraryError::NothingToReport);
        }

        let mut rows = Vec::with_capacity(self.history.len() + self.open_loans.len());
        rows.extend(self.history.iter().map(ReportRow::returned));
        rows.extend(self.open_loans.iter().map(ReportRow::active));
        Ok(rows)
    }
}
