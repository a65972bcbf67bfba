//! Existence validator: ledger loading and request reconciliation
//!
//! Loads the catalog and request ledgers best-effort (a malformed row is
//! skipped with a stderr warning, never fatal) and computes which requests
//! are genuinely new. Reconciliation is a pure function over already-loaded
//! sequences so it can be tested without touching disk.

use crate::io::LedgerReader;
use crate::types::{BookRecord, LibraryError, LoanRequest};
use std::collections::HashSet;
use std::path::Path;

/// Load the purchase catalog from a ledger file
///
/// Parsing is best-effort: each malformed row is reported on stderr and
/// skipped, and loading continues with the next line. Only failure to open
/// the file is an error.
pub fn load_catalog(path: &Path) -> Result<Vec<BookRecord>, LibraryError> {
    let reader = LedgerReader::new(path)?;

    let mut books = Vec::new();
    for row in reader {
        match row {
            Ok(book) => books.push(book),
            Err(e) => eprintln!("warning: skipping row in '{}': {}", path.display(), e),
        }
    }
    Ok(books)
}

/// Load pending requests from a ledger file
///
/// Same parsing contract as `load_catalog`, producing provenance-tagged
/// requests instead of catalog records.
pub fn load_requests(path: &Path) -> Result<Vec<LoanRequest>, LibraryError> {
    let books = load_catalog(path)?;
    Ok(books.into_iter().map(LoanRequest::new).collect())
}

/// Filter out requests already present in the catalog
///
/// Builds one set of catalog ids and one set of lower-cased catalog titles,
/// then keeps only the requests absent from both. A request matching by id
/// OR by case-insensitive title is a duplicate and is dropped, even when
/// the other field differs. The surviving requests keep their original
/// order (stable filter). Pure: no I/O, deterministic given its inputs.
pub fn reconcile(requests: Vec<LoanRequest>, catalog: &[BookRecord]) -> Vec<LoanRequest> {
    let known_ids: HashSet<u32> = catalog.iter().map(|book| book.id).collect();
    let known_titles: HashSet<String> = catalog
        .iter()
        .map(|book| book.title.to_lowercase())
        .collect();

    requests
        .into_iter()
        .filter(|request| {
            !known_ids.contains(&request.book.id)
                && !known_titles.contains(&request.book.title.to_lowercase())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn book(id: u32, title: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            author: "Autor".to_string(),
            genre: "Género".to_string(),
            published: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            publisher: "Editorial".to_string(),
            price: Decimal::new(1500, 2),
        }
    }

    fn request(id: u32, title: &str) -> LoanRequest {
        LoanRequest::new(book(id, title))
    }

    fn create_temp_ledger(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_catalog_skips_bad_rows_and_keeps_good_ones() {
        let file = create_temp_ledger(
            "ID;Título;Autor;Género;Fecha de publicación;Editorial;Precio\n\
             1;Ficciones;Borges;Cuentos;1944-06-01;Sur;20.00\n\
             esta línea no es un libro\n\
             2;El Aleph;Borges;Cuentos;1949-06-15;Losada;18.25\n",
        );

        let books = load_catalog(file.path()).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, 1);
        assert_eq!(books[1].id, 2);
    }

    #[test]
    fn test_load_requests_tags_provenance() {
        let file = create_temp_ledger(
            "ID;Título;Autor;Género;Fecha de publicación;Editorial;Precio\n\
             9;Pedro Páramo;Juan Rulfo;Novela;1955-03-19;FCE;12.00\n",
        );

        let requests = load_requests(file.path()).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].provenance,
            crate::types::Provenance::PendingRequest
        );
        assert_eq!(requests[0].book.title, "Pedro Páramo");
    }

    #[test]
    fn test_reconcile_drops_duplicate_by_id_even_if_title_differs() {
        let catalog = vec![book(101, "Old")];
        let requests = vec![request(101, "New")];

        assert!(reconcile(requests, &catalog).is_empty());
    }

    #[test]
    fn test_reconcile_drops_duplicate_by_title_case_insensitive() {
        let catalog = vec![book(1, "don quijote")];
        let requests = vec![request(999, "Don Quijote")];

        assert!(reconcile(requests, &catalog).is_empty());
    }

    #[test]
    fn test_reconcile_keeps_new_requests_in_order() {
        let catalog = vec![book(1, "Ficciones")];
        let requests = vec![
            request(2, "Rayuela"),
            request(1, "Cualquiera"), // duplicate id
            request(3, "El Aleph"),
            request(4, "ficciones"), // duplicate title
            request(5, "Pedro Páramo"),
        ];

        let valid = reconcile(requests, &catalog);
        let ids: Vec<u32> = valid.iter().map(|r| r.book.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let catalog = vec![book(1, "Ficciones")];
        let requests = vec![request(2, "Rayuela"), request(3, "El Aleph")];

        let once = reconcile(requests.clone(), &catalog);
        let twice = reconcile(once.clone(), &catalog);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reconcile_empty_requests_yield_empty_list() {
        let catalog = vec![book(1, "Ficciones")];
        assert!(reconcile(Vec::new(), &catalog).is_empty());
    }

    #[test]
    fn test_reconcile_against_empty_catalog_keeps_everything() {
        let requests = vec![request(1, "Ficciones"), request(2, "Rayuela")];
        assert_eq!(reconcile(requests, &[]).len(), 2);
    }
}
