//! Persistence gateway for the on-disk ledgers and report output
//!
//! Owns the path layout under one base data directory, bootstraps it at
//! startup, and performs every write the system does:
//!
//! - `Existencia/Compras.txt` — the purchase catalog ledger
//! - `Biblioteca/Solicitudes.txt` — the pending request ledger
//! - `Biblioteca/Salida/` — dated loan report files
//!
//! Writes are append-only where possible (requests, catalog) and a full
//! rewrite for truncation (clearing the request ledger), each performed as
//! a single write call to avoid partial-file corruption. There is no
//! cross-file transaction: a crash between "append to catalog" and
//! "truncate requests" can re-purchase a fulfilled request on the next run.
//! That limitation is accepted, not worked around.

use crate::io::ledger_format::{format_ledger_line, write_report_csv, LEDGER_HEADER};
use crate::types::{BookRecord, LibraryError, ReportRow};
use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-system collaborator for ledger and report persistence
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    base_dir: PathBuf,
}

impl PersistenceGateway {
    /// Create a gateway rooted at `base_dir`
    ///
    /// Nothing is touched on disk until `bootstrap` is called.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        PersistenceGateway {
            base_dir: base_dir.into(),
        }
    }

    /// Path of the purchase catalog ledger
    pub fn catalog_path(&self) -> PathBuf {
        self.base_dir.join("Existencia").join("Compras.txt")
    }

    /// Path of the pending request ledger
    pub fn requests_path(&self) -> PathBuf {
        self.base_dir.join("Biblioteca").join("Solicitudes.txt")
    }

    /// Directory that receives dated report files
    pub fn report_dir(&self) -> PathBuf {
        self.base_dir.join("Biblioteca").join("Salida")
    }

    /// Create the directory layout and seed missing ledgers
    ///
    /// Both ledger files are created header-only when absent; existing
    /// files are left untouched. Failure here is the one fatal startup
    /// error in the system.
    pub fn bootstrap(&self) -> Result<(), LibraryError> {
        for path in [self.catalog_path(), self.requests_path()] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            if !path.exists() {
                fs::write(&path, format!("{}\n", LEDGER_HEADER))?;
            }
        }
        fs::create_dir_all(self.report_dir())?;
        Ok(())
    }

    /// Append one record to the request ledger
    ///
    /// A single write call of one formatted line.
    pub fn append_request(&self, book: &BookRecord) -> Result<(), LibraryError> {
        Self::append_lines(&self.requests_path(), std::slice::from_ref(book))
    }

    /// Append records to the purchase catalog ledger
    ///
    /// All lines are buffered and written in a single call.
    pub fn append_catalog(&self, books: &[BookRecord]) -> Result<(), LibraryError> {
        Self::append_lines(&self.catalog_path(), books)
    }

    /// Reset the request ledger to an empty, header-only state
    pub fn truncate_requests(&self) -> Result<(), LibraryError> {
        fs::write(self.requests_path(), format!("{}\n", LEDGER_HEADER))?;
        Ok(())
    }

    /// Write the general loan report for `today`
    ///
    /// The file lands in the output directory as
    /// `Reporte_General_Prestamos_<YYYY-MM-DD>.csv`; an existing report for
    /// the same date is overwritten.
    ///
    /// # Returns
    ///
    /// The path of the written report file.
    pub fn write_report(
        &self,
        rows: &[ReportRow],
        today: NaiveDate,
    ) -> Result<PathBuf, LibraryError> {
        let dir = self.report_dir();
        fs::create_dir_all(&dir)?;

        let filename = format!("Reporte_General_Prestamos_{}.csv", today.format("%Y-%m-%d"));
        let path = dir.join(filename);

        let mut file = File::create(&path)?;
        write_report_csv(rows, &mut file)?;

        Ok(path)
    }

    fn append_lines(path: &Path, books: &[BookRecord]) -> Result<(), LibraryError> {
        if books.is_empty() {
            return Ok(());
        }

        let mut buffer = String::new();
        for book in books {
            buffer.push_str(&format_ledger_line(book));
            buffer.push('\n');
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(buffer.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn sample_book(id: u32, title: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            author: "Autor".to_string(),
            genre: "Género".to_string(),
            published: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            publisher: "Editorial".to_string(),
            price: Decimal::new(1000, 2),
        }
    }

    fn bootstrapped_gateway() -> (TempDir, PersistenceGateway) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let gateway = PersistenceGateway::new(dir.path());
        gateway.bootstrap().expect("bootstrap failed");
        (dir, gateway)
    }

    #[test]
    fn test_bootstrap_seeds_header_only_ledgers() {
        let (_dir, gateway) = bootstrapped_gateway();

        let catalog = fs::read_to_string(gateway.catalog_path()).unwrap();
        let requests = fs::read_to_string(gateway.requests_path()).unwrap();
        assert_eq!(catalog, format!("{}\n", LEDGER_HEADER));
        assert_eq!(requests, format!("{}\n", LEDGER_HEADER));
        assert!(gateway.report_dir().is_dir());
    }

    #[test]
    fn test_bootstrap_leaves_existing_ledgers_alone() {
        let (_dir, gateway) = bootstrapped_gateway();
        gateway.append_catalog(&[sample_book(1, "Ficciones")]).unwrap();

        // A second bootstrap must not re-seed the populated file
        gateway.bootstrap().unwrap();

        let catalog = fs::read_to_string(gateway.catalog_path()).unwrap();
        assert!(catalog.contains("Ficciones"));
    }

    #[test]
    fn test_append_request_adds_one_line() {
        let (_dir, gateway) = bootstrapped_gateway();

        gateway.append_request(&sample_book(5, "Rayuela")).unwrap();

        let requests = fs::read_to_string(gateway.requests_path()).unwrap();
        let lines: Vec<&str> = requests.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "5;Rayuela;Autor;Género;2000-01-01;Editorial;10.00");
    }

    #[test]
    fn test_append_catalog_writes_all_records() {
        let (_dir, gateway) = bootstrapped_gateway();

        gateway
            .append_catalog(&[sample_book(1, "Ficciones"), sample_book(2, "El Aleph")])
            .unwrap();

        let catalog = fs::read_to_string(gateway.catalog_path()).unwrap();
        assert_eq!(catalog.lines().count(), 3);
    }

    #[test]
    fn test_truncate_requests_leaves_header_only() {
        let (_dir, gateway) = bootstrapped_gateway();
        gateway.append_request(&sample_book(5, "Rayuela")).unwrap();

        gateway.truncate_requests().unwrap();

        let requests = fs::read_to_string(gateway.requests_path()).unwrap();
        assert_eq!(requests, format!("{}\n", LEDGER_HEADER));
    }

    #[test]
    fn test_write_report_creates_dated_file() {
        let (_dir, gateway) = bootstrapped_gateway();
        let today = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();

        let path = gateway.write_report(&[], today).unwrap();

        assert!(path.ends_with("Reporte_General_Prestamos_2024-03-21.csv"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("ID Libro;Titulo"));
    }
}
