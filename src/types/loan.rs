//! Loan lifecycle types for the Library Loan Engine
//!
//! A Loan associates one book with a borrower and two calendar dates. It is
//! created open (loan date set, return date unset) and closed exactly once;
//! the transition is irreversible. Fine arithmetic is exact fixed-point.

use crate::types::book::BookRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Standard loan term in whole days; days beyond it accrue the late fee
pub const STANDARD_TERM_DAYS: i64 = 15;

/// Late fee accrued per day beyond the standard term (0.75 currency units)
pub const LATE_FEE_PER_DAY: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Whether a loan has been returned yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    /// Closed: the book is back in the pool
    Returned,
    /// Open: the book is still with the borrower
    Active,
}

/// One lending of one book to one borrower
///
/// The book is exclusively embedded here while the loan is open; it is never
/// simultaneously present in the available pool. After closing, the loan is
/// immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    /// The book on loan
    pub book: BookRecord,

    /// Free-text borrower identifier
    pub borrower_id: String,

    /// Date the loan was opened
    pub loan_date: NaiveDate,

    /// Date the loan was closed; `None` while the loan is open.
    /// Once set, never cleared.
    return_date: Option<NaiveDate>,
}

impl Loan {
    /// Open a new loan for `book`, dated `today`
    pub fn open(book: BookRecord, borrower_id: String, today: NaiveDate) -> Self {
        Loan {
            book,
            borrower_id,
            loan_date: today,
            return_date: None,
        }
    }

    /// The return date, if the loan has been closed
    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    /// Current lifecycle status
    pub fn status(&self) -> LoanStatus {
        if self.return_date.is_some() {
            LoanStatus::Returned
        } else {
            LoanStatus::Active
        }
    }

    /// Close the loan as of `today`
    ///
    /// The first close wins; closing an already-closed loan leaves the
    /// recorded return date untouched.
    pub(crate) fn close(&mut self, today: NaiveDate) {
        if self.return_date.is_none() {
            self.return_date = Some(today);
        }
    }

    /// Whole days beyond the standard term, floored at zero
    ///
    /// An open loan reports zero: no fine is owed until the return is
    /// actually recorded.
    pub fn days_late(&self) -> i64 {
        let Some(returned) = self.return_date else {
            return 0;
        };
        let elapsed = (returned - self.loan_date).num_days();
        (elapsed - STANDARD_TERM_DAYS).max(0)
    }

    /// Fine owed: `days_late × 0.75`, exact decimal
    pub fn fine(&self) -> Decimal {
        LATE_FEE_PER_DAY * Decimal::from(self.days_late())
    }
}

/// Summary handed back to the caller after a successful return
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnReceipt {
    /// Title of the returned book
    pub title: String,

    /// Borrower who held the loan
    pub borrower_id: String,

    /// Whole days beyond the standard term
    pub days_late: i64,

    /// Fine owed, 2 decimal places
    pub fine: Decimal,
}

impl ReturnReceipt {
    /// Build a receipt from a just-closed loan
    pub fn for_loan(loan: &Loan) -> Self {
        ReturnReceipt {
            title: loan.book.title.clone(),
            borrower_id: loan.borrower_id.clone(),
            days_late: loan.days_late(),
            fine: loan.fine(),
        }
    }
}

/// One line of the general loan report
///
/// Closed loans carry concrete return data; active loans carry `None` in
/// the return-side fields, rendered as not-applicable sentinels on disk
/// rather than zeros (a zero would imply no fine will ever be owed).
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub book_id: u32,
    pub title: String,
    pub author: String,
    pub borrower_id: String,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub days_late: Option<i64>,
    pub fine: Option<Decimal>,
    pub status: LoanStatus,
}

impl ReportRow {
    /// Row for a closed loan out of the history
    pub fn returned(loan: &Loan) -> Self {
        ReportRow {
            book_id: loan.book.id,
            title: loan.book.title.clone(),
            author: loan.book.author.clone(),
            borrower_id: loan.borrower_id.clone(),
            loan_date: loan.loan_date,
            return_date: loan.return_date(),
            days_late: Some(loan.days_late()),
            fine: Some(loan.fine()),
            status: LoanStatus::Returned,
        }
    }

    /// Row for a loan still open
    pub fn active(loan: &Loan) -> Self {
        ReportRow {
            book_id: loan.book.id,
            title: loan.book.title.clone(),
            author: loan.book.author.clone(),
            borrower_id: loan.borrower_id.clone(),
            loan_date: loan.loan_date,
            return_date: None,
            days_late: None,
            fine: None,
            status: LoanStatus::Active,
        }
    }
}
