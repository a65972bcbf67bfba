//! I/O module
//!
//! Handles delimited-text parsing and file persistence.
//!
//! # Components
//!
//! - `ledger_format` - row conversion and report serialization (pure)
//! - `ledger_reader` - streaming ledger reader with iterator interface
//! - `gateway` - directory bootstrap, ledger appends/truncation, report files

pub mod gateway;
pub mod ledger_format;
pub mod ledger_reader;

pub use gateway::PersistenceGateway;
pub use ledger_format::{
    convert_ledger_row, format_ledger_line, write_report_csv, RawLedgerRow, LEDGER_HEADER,
};
pub use ledger_reader::LedgerReader;
