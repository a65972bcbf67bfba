//! Ledger format handling for book records and report output
//!
//! This module centralizes all delimited-text format concerns, providing:
//! - RawLedgerRow structure for deserialization
//! - Conversion from raw rows to BookRecord
//! - Ledger line formatting for appends
//! - Loan report serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! Both ledgers (catalog and requests) share one on-disk shape: UTF-8 text,
//! `;`-delimited, one record per line, with an optional Spanish header row.

use crate::types::{BookRecord, LibraryError, LoanStatus, ReportRow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Header row written to both ledger files on creation and truncation
pub const LEDGER_HEADER: &str = "ID;Título;Autor;Género;Fecha de publicación;Editorial;Precio";

/// Header row of the general loan report
pub const REPORT_HEADER: [&str; 9] = [
    "ID Libro",
    "Titulo",
    "Autor",
    "Usuario",
    "Fecha Prestamo",
    "Fecha Devolucion",
    "Dias Retraso",
    "Multa",
    "Estado",
];

/// Date format used on disk for every calendar date
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw ledger row structure for deserialization
///
/// Every field is kept as a string so one unparsable cell fails conversion,
/// not deserialization: the row still reaches `convert_ledger_row`, which
/// produces a skippable error instead of aborting the whole read.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RawLedgerRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published: String,
    pub publisher: String,
    pub price: String,
}

impl RawLedgerRow {
    /// Whether this row is a (possibly repeated) header line
    ///
    /// A header's first field is the literal `ID`, which never parses as a
    /// numeric id, so header rows are recognized and skipped silently
    /// rather than warned about.
    pub fn is_header(&self) -> bool {
        self.id.trim().eq_ignore_ascii_case("id")
    }
}

/// Convert a RawLedgerRow to a BookRecord
///
/// This function:
/// - Parses the id into a numeric BookId
/// - Parses the publication date as ISO 8601 (`YYYY-MM-DD`)
/// - Parses the price as an exact decimal
///
/// # Returns
///
/// Result containing either:
/// - Ok(BookRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_ledger_row(raw: RawLedgerRow) -> Result<BookRecord, String> {
    let id = raw
        .id
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid id '{}'", raw.id))?;

    let published = NaiveDate::parse_from_str(raw.published.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid publication date '{}' for book {}", raw.published, id))?;

    let price = Decimal::from_str(raw.price.trim())
        .map_err(|_| format!("invalid price '{}' for book {}", raw.price, id))?;

    Ok(BookRecord {
        id,
        title: raw.title.trim().to_string(),
        author: raw.author.trim().to_string(),
        genre: raw.genre.trim().to_string(),
        published,
        publisher: raw.publisher.trim().to_string(),
        price,
    })
}

/// Format a BookRecord as one ledger line (no trailing newline)
///
/// The inverse of `convert_ledger_row`: semicolon-delimited fields with the
/// date as ISO 8601 and the price rendered to 2 decimal places.
pub fn format_ledger_line(book: &BookRecord) -> String {
    format!(
        "{};{};{};{};{};{};{:.2}",
        book.id,
        book.title,
        book.author,
        book.genre,
        book.published.format(DATE_FORMAT),
        book.publisher,
        book.price
    )
}

/// Write loan report rows in `;`-delimited CSV format
///
/// Writes the fixed Spanish report header followed by one row per loan.
/// Closed loans carry their return date, days late, and fine; active loans
/// render the sentinels `Pendiente` and `N/A` instead, so an open loan is
/// never mistaken for one with a settled zero fine.
///
/// # Arguments
///
/// * `rows` - Report rows, history first, then active loans
/// * `output` - Mutable reference to a writer for the report
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(LibraryError)` if a write error occurred
pub fn write_report_csv(rows: &[ReportRow], output: &mut dyn Write) -> Result<(), LibraryError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(output);

    writer.write_record(REPORT_HEADER)?;

    for row in rows {
        let return_date = match row.return_date {
            Some(date) => date.format(DATE_FORMAT).to_string(),
            None => "Pendiente".to_string(),
        };
        let days_late = match row.days_late {
            Some(days) => days.to_string(),
            None => "N/A".to_string(),
        };
        let fine = match row.fine {
            Some(fine) => format!("{:.2}", fine),
            None => "N/A".to_string(),
        };
        let status = match row.status {
            LoanStatus::Returned => "Devuelto",
            LoanStatus::Active => "Activo",
        };

        writer.write_record(&[
            row.book_id.to_string(),
            row.title.clone(),
            row.author.clone(),
            row.borrower_id.clone(),
            row.loan_date.format(DATE_FORMAT).to_string(),
            return_date,
            days_late,
            fine,
            status.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
