//! Library Loan Engine CLI
//!
//! Interactive console for the library loan tracker.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir /path/to/library-data
//! ```
//!
//! On startup the program bootstraps the data directory (creating
//! header-only ledgers on first run), seeds the available pool from the
//! purchase catalog, and enters a numbered menu loop on stdin.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Unrecoverable startup failure (data directory or catalog unusable)

use library_loan_engine::cli;
use library_loan_engine::{LibraryService, PersistenceGateway};
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();

    // Bootstrap failure is the only fatal error; everything after this
    // point reports to the console and keeps the loop running.
    let gateway = PersistenceGateway::new(&args.data_dir);
    let mut service = match LibraryService::new(gateway) {
        Ok(service) => service,
        Err(e) => {
            eprintln!(
                "Error: failed to initialize '{}': {}",
                args.data_dir.display(),
                e
            );
            process::exit(1);
        }
    };

    println!(
        "System initialized; {} book(s) available (data dir: {}).",
        service.available_books().len(),
        args.data_dir.display()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    if let Err(e) = cli::menu::run(&mut service, &mut input, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
