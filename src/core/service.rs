//! Library service: orchestration between validator, loan ledger, and disk
//!
//! Thin composition layer. Owns one LoanLedger and one PersistenceGateway,
//! seeds the pool from the purchase catalog at startup, and forwards
//! lend/return/report commands from the console frontend. The two
//! record-level commands (submit a request, fulfill pending requests) go
//! through the existence validator so nothing already in the catalog can be
//! requested or purchased twice.

use crate::core::ledger::LoanLedger;
use crate::core::validator;
use crate::io::PersistenceGateway;
use crate::types::{BookRecord, LibraryError, Loan, ReturnReceipt};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Outcome of a fulfillment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FulfillmentSummary {
    /// Requests purchased into the catalog and pushed into circulation
    pub purchased: usize,

    /// Requests dropped because the catalog already had their id or title
    pub duplicates: usize,
}

impl FulfillmentSummary {
    /// Whether the request ledger had nothing actionable
    pub fn nothing_pending(&self) -> bool {
        self.purchased == 0 && self.duplicates == 0
    }
}

/// Outcome of writing the general loan report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Where the report file was written
    pub path: PathBuf,

    /// Number of rows in the report (history + active)
    pub rows: usize,
}

/// Orchestrator wiring the loan ledger to persistent storage
///
/// Constructed once at startup and handed to the command loop; there are no
/// process-wide singletons.
#[derive(Debug)]
pub struct LibraryService {
    ledger: LoanLedger,
    gateway: PersistenceGateway,
}

impl LibraryService {
    /// Bootstrap storage and seed the pool from the purchase catalog
    ///
    /// The catalog ledger is loaded best-effort and its records become the
    /// available pool in file order (last line on top of the LIFO pool).
    ///
    /// # Errors
    ///
    /// An I/O failure here (directories cannot be created, catalog
    /// unreadable) is the one fatal startup error of the system.
    pub fn new(gateway: PersistenceGateway) -> Result<Self, LibraryError> {
        gateway.bootstrap()?;

        let catalog = validator::load_catalog(&gateway.catalog_path())?;
        let mut ledger = LoanLedger::new();
        ledger.seed(catalog);

        Ok(LibraryService { ledger, gateway })
    }

    /// Snapshot of the available pool
    pub fn available_books(&self) -> &[BookRecord] {
        self.ledger.list_available()
    }

    /// Lend a specific book chosen from an earlier listing
    pub fn lend(
        &mut self,
        record: &BookRecord,
        borrower_id: &str,
        today: NaiveDate,
    ) -> Result<Loan, LibraryError> {
        self.ledger.lend(record, borrower_id, today)
    }

    /// Lend the top of the pool without offering a choice
    pub fn lend_next(
        &mut self,
        borrower_id: &str,
        today: NaiveDate,
    ) -> Result<Loan, LibraryError> {
        self.ledger.lend_next(borrower_id, today)
    }

    /// Return the earliest-opened loan
    pub fn return_loan(&mut self, today: NaiveDate) -> Result<ReturnReceipt, LibraryError> {
        self.ledger.return_loan(today)
    }

    /// Generate the loan report and write it to the output directory
    ///
    /// # Errors
    ///
    /// `NothingToReport` when the history and the open-loan queue are both
    /// empty (no file is written); `Io` if the report file cannot be
    /// written.
    pub fn generate_report(&self, today: NaiveDate) -> Result<ReportOutcome, LibraryError> {
        let rows = self.ledger.report()?;
        let path = self.gateway.write_report(&rows, today)?;
        Ok(ReportOutcome {
            path,
            rows: rows.len(),
        })
    }

    /// Record a new request in the request ledger
    ///
    /// The catalog is re-read from disk at call time, not cached, so a
    /// fulfillment that ran since startup is taken into account.
    ///
    /// # Errors
    ///
    /// `DuplicateRequest` if the catalog already holds the id or the
    /// case-insensitively matched title; nothing is written in that case.
    pub fn submit_request(&self, record: &BookRecord) -> Result<(), LibraryError> {
        let catalog = validator::load_catalog(&self.gateway.catalog_path())?;

        let requested_title = record.title.to_lowercase();
        let collides = catalog
            .iter()
            .any(|book| book.id == record.id || book.title.to_lowercase() == requested_title);
        if collides {
            return Err(LibraryError::duplicate_request(record.id, &record.title));
        }

        self.gateway.append_request(record)
    }

    /// Purchase all pending requests into the catalog
    ///
    /// Loads the request ledger, reconciles it against the current catalog
    /// (dropping any request whose id or title has appeared there in the
    /// meantime), appends the survivors to the catalog ledger, pushes them
    /// into the available pool, and truncates the request ledger back to
    /// header-only. The append and the truncation are two independent
    /// writes with no cross-file atomicity.
    ///
    /// An empty request ledger is a no-op: catalog and pool are unchanged
    /// and the summary reports nothing pending.
    pub fn fulfill_requests(&mut self) -> Result<FulfillmentSummary, LibraryError> {
        let requests = validator::load_requests(&self.gateway.requests_path())?;
        if requests.is_empty() {
            return Ok(FulfillmentSummary {
                purchased: 0,
                duplicates: 0,
            });
        }

        let catalog = validator::load_catalog(&self.gateway.catalog_path())?;
        let total = requests.len();
        let valid = validator::reconcile(requests, &catalog);
        let purchased = valid.len();

        let books: Vec<BookRecord> = valid.into_iter().map(|r| r.into_book()).collect();
        self.gateway.append_catalog(&books)?;
        for book in books {
            self.ledger.add_available(book);
        }
        self.gateway.truncate_requests()?;

        Ok(FulfillmentSummary {
            purchased,
            duplicates: total - purchased,
        })
    }
}
