//! Banking Ledger Simulator CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- input.json > output.json
//! cargo run -- --rates rates.csv input.json > output.json
//! cargo run -- --accounts-out accounts.csv --log-level debug input.json > output.json
//! ```
//!
//! The program reads users, exchange rates and commands from the input
//! document, runs every command in order, and writes the output document to
//! stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, input not found or unreadable, etc.)

use banking_ledger_sim::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let runner = args.to_runner();

    let mut output = std::io::stdout();
    if let Err(e) = runner.process(&args.input_file, &mut output) {
        tracing::error!(error = %e, "Simulation failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
