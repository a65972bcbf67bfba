//! Streaming ledger reader with iterator interface
//!
//! Provides a streaming iterator over book records from one semicolon-
//! delimited ledger file. Delegates format concerns to the ledger_format
//! module.
//!
//! # Design
//!
//! The LedgerReader uses csv::Reader configured for the `;` delimiter to
//! read and deserialize rows sequentially, converting each through
//! `ledger_format::convert_ledger_row`. Records are processed one at a time
//! without loading the entire file into memory.
//!
//! Header detection is row-based rather than positional: any row whose
//! first field is the literal `ID` is skipped silently, so ledgers with a
//! header, without one, or with a header re-written mid-file (after a
//! truncation) all load cleanly.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::ledger_format::{convert_ledger_row, RawLedgerRow};
use crate::types::{BookRecord, LibraryError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over one ledger file
///
/// Implements Iterator, yielding `Result<BookRecord, String>` per data row.
/// Header rows are consumed without being yielded.
#[derive(Debug)]
pub struct LedgerReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl LedgerReader {
    /// Open a ledger file for streaming iteration
    ///
    /// The CSV reader is configured to:
    /// - Split on `;`
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (short rows fail conversion, not the
    ///   whole read)
    /// - Treat every line as data (header rows are filtered by content)
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ledger file
    ///
    /// # Returns
    ///
    /// * `Ok(LedgerReader)` if the file opened successfully
    /// * `Err(LibraryError::Io)` if it could not be opened
    pub fn new(path: &Path) -> Result<Self, LibraryError> {
        let file = File::open(path).map_err(|e| {
            LibraryError::io(format!("failed to open ledger '{}': {}", path.display(), e))
        })?;

        let reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for LedgerReader {
    type Item = Result<BookRecord, String>;

    /// Get the next book record from the ledger
    ///
    /// Header rows are skipped silently. Malformed rows yield an error
    /// carrying the line number; iteration continues afterwards.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut deserializer = self.reader.deserialize::<RawLedgerRow>();

            match deserializer.next()? {
                Ok(raw) => {
                    self.line_num += 1;
                    if raw.is_header() {
                        continue;
                    }
                    return Some(
                        convert_ledger_row(raw)
                            .map_err(|e| format!("line {}: {}", self.line_num, e)),
                    );
                }
                Err(e) => {
                    self.line_num += 1;
                    return Some(Err(format!("line {}: malformed row: {}", self.line_num, e)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary ledger file for testing
    fn create_temp_ledger(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const HEADER: &str = "ID;Título;Autor;Género;Fecha de publicación;Editorial;Precio\n";

    #[test]
    fn test_reader_fails_on_missing_file() {
        let result = LedgerReader::new(Path::new("nonexistent.txt"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to open ledger"));
    }

    #[test]
    fn test_reader_parses_valid_rows() {
        let content = format!(
            "{}1;Ficciones;Jorge Luis Borges;Cuentos;1944-06-01;Sur;20.00\n\
             2;Rayuela;Julio Cortázar;Novela;1963-06-28;Sudamericana;25.50\n",
            HEADER
        );
        let file = create_temp_ledger(&content);

        let reader = LedgerReader::new(file.path()).unwrap();
        let books: Vec<_> = reader.collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, 1);
        assert_eq!(books[0].title, "Ficciones");
        assert_eq!(
            books[0].published,
            NaiveDate::from_ymd_opt(1944, 6, 1).unwrap()
        );
        assert_eq!(books[1].price, Decimal::new(2550, 2));
    }

    #[test]
    fn test_reader_skips_header_silently() {
        let content = format!("{}1;Ficciones;Borges;Cuentos;1944-06-01;Sur;20.00\n", HEADER);
        let file = create_temp_ledger(&content);

        let reader = LedgerReader::new(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        // Only the data row is yielded; no error for the header
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_ok());
    }

    #[test]
    fn test_reader_handles_headerless_ledger() {
        let content = "1;Ficciones;Borges;Cuentos;1944-06-01;Sur;20.00\n";
        let file = create_temp_ledger(content);

        let reader = LedgerReader::new(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_ok());
    }

    #[test]
    fn test_reader_yields_error_for_malformed_row_and_continues() {
        let content = format!(
            "{}1;Ficciones;Borges;Cuentos;1944-06-01;Sur;20.00\n\
             no-es-un-id;Título;Autor;Género;2020-01-01;Editorial;9.99\n\
             3;El Aleph;Borges;Cuentos;1949-06-15;Losada;18.25\n",
            HEADER
        );
        let file = create_temp_ledger(&content);

        let reader = LedgerReader::new(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(rows[1].is_err());
        assert!(rows[2].is_ok());

        let error = rows[1].as_ref().unwrap_err();
        assert!(error.contains("line 3"));
        assert!(error.contains("invalid id"));
    }

    #[test]
    fn test_reader_yields_error_for_short_row() {
        let content = format!("{}1;Ficciones;Borges\n", HEADER);
        let file = create_temp_ledger(&content);

        let reader = LedgerReader::new(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_err());
    }

    #[test]
    fn test_reader_handles_header_only_ledger() {
        let file = create_temp_ledger(HEADER);

        let reader = LedgerReader::new(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_reader_skips_repeated_header_after_truncation() {
        // A truncated-then-appended ledger can carry the header twice
        let content = format!(
            "{}{}1;Ficciones;Borges;Cuentos;1944-06-01;Sur;20.00\n",
            HEADER, HEADER
        );
        let file = create_temp_ledger(&content);

        let reader = LedgerReader::new(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_ok());
    }
}
