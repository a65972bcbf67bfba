//! Book-related types for the Library Loan Engine
//!
//! This module defines the BookRecord entity shared by the catalog and
//! request ledgers, plus the provenance tag that distinguishes a pending
//! request from a purchased catalog entry.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Book identifier
///
/// Unique within a single ledger; supports ids from 0 to 4,294,967,295
pub type BookId = u32;

/// Where a record currently lives in the purchase pipeline
///
/// A record parsed from the catalog ledger is `Catalog`; a record parsed
/// from (or submitted to) the request ledger is `PendingRequest` until
/// `fulfill_requests` purchases it. Modeled as a tag on a shared record
/// type rather than a subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Purchased and eligible for lending
    Catalog,
    /// Sitting in the request ledger, not yet purchased
    PendingRequest,
}

/// Immutable description of a book
///
/// Constructed when a ledger line is parsed or when a librarian submits a
/// new request. Never mutated afterwards; equality covers every field and
/// is what the loan ledger uses to remove a specific record from the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    /// Numeric id, unique within its ledger
    pub id: BookId,

    /// Free-text title
    pub title: String,

    /// Free-text author
    pub author: String,

    /// Free-text genre
    pub genre: String,

    /// Publication date (calendar date, ISO 8601 on disk)
    pub published: NaiveDate,

    /// Free-text publisher
    pub publisher: String,

    /// Purchase price, exact fixed-point with 2 decimal places on disk
    pub price: Decimal,
}

/// A BookRecord tagged as not yet purchased
///
/// Structurally identical to a catalog entry; kept distinct because it
/// participates in the request ledger until validated and fulfilled.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    /// The requested book
    pub book: BookRecord,

    /// Always `Provenance::PendingRequest` while in the request ledger
    pub provenance: Provenance,
}

impl LoanRequest {
    /// Wrap a record as a pending request
    pub fn new(book: BookRecord) -> Self {
        LoanRequest {
            book,
            provenance: Provenance::PendingRequest,
        }
    }

    /// Consume the request, yielding the underlying record for purchase
    pub fn into_book(self) -> BookRecord {
        self.book
    }
}
