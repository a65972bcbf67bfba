use clap::Parser;
use std::path::PathBuf;

/// Track a small library's inventory, requests, and loan lifecycle
#[derive(Parser, Debug)]
#[command(name = "library-loan-engine")]
#[command(
    about = "Library loan tracker over semicolon-delimited ledgers",
    long_about = None
)]
pub struct CliArgs {
    /// Base data directory holding the ledgers and report output
    ///
    /// The layout `Existencia/Compras.txt`, `Biblioteca/Solicitudes.txt`,
    /// and `Biblioteca/Salida/` is created underneath it on first run.
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "library-data",
        help = "Base directory for ledger files and reports"
    )]
    pub data_dir: PathBuf,
}
