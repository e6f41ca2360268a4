//! Simulation pipeline
//!
//! The SimulationRunner orchestrates one complete run, delegating:
//! - Document parsing to `json_format::read_document`
//! - Extra rate loading to `RatesReader` (iterator interface)
//! - Command execution to `LedgerEngine` (business logic)
//! - Output to `json_format::write_output` and `csv_format::write_accounts_csv`
//!
//! # Error Handling
//!
//! Fatal errors (input not found or unparseable, output not writable) are
//! returned immediately. A command that fails or cannot be decoded is
//! reported in the output document and the run continues; a rate record that
//! cannot be decoded is logged and skipped.

use crate::core::engine::LedgerEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::json_format::{
    command_header, decode_command, output_entry, read_document, write_output,
};
use crate::io::rates_reader::RatesReader;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One simulation run's file configuration
///
/// # Examples
///
/// ```no_run
/// use banking_ledger_sim::runner::SimulationRunner;
/// use std::path::Path;
///
/// let runner = SimulationRunner::default();
/// let mut output = std::io::stdout();
///
/// runner.process(Path::new("input.json"), &mut output)
///     .expect("Simulation failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationRunner {
    /// CSV rate file loaded after the document's own rates
    pub rates_file: Option<PathBuf>,

    /// Where to write the final account snapshot
    pub accounts_out: Option<PathBuf>,
}

impl SimulationRunner {
    /// Run the document at `input_path` and write the output document
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the run completed (individual commands may have failed)
    /// * `Err(String)` if a fatal error occurred
    pub fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let document = read_document(input_path).map_err(|e| e.to_string())?;

        let mut engine = LedgerEngine::new();
        for user in document.users {
            engine.add_user(user);
        }

        let mut edges = document.exchange_rates;
        if let Some(rates_path) = &self.rates_file {
            let reader = RatesReader::new(rates_path).map_err(|e| e.to_string())?;
            for result in reader {
                match result {
                    Ok(edge) => edges.push(edge),
                    Err(e) => warn!(error = %e, "Skipping rate record"),
                }
            }
        }
        engine.load_rates(edges);

        let mut entries: Vec<Value> = Vec::new();
        for value in document.commands {
            let (raw_name, raw_timestamp) = command_header(&value);
            let command = match decode_command(value) {
                Ok(command) => command,
                Err(e) => {
                    warn!(command = %raw_name, timestamp = raw_timestamp, error = %e, "Rejecting command");
                    entries.extend(output_entry(&raw_name, raw_timestamp, &Err(e)));
                    continue;
                }
            };

            let name = command.name();
            let timestamp = command.timestamp();
            let result = engine.process(command);
            if let Err(e) = &result {
                warn!(command = name, timestamp, error = %e, "Command rejected");
            }

            if let Some(entry) = output_entry(name, timestamp, &result) {
                entries.push(entry);
            }
        }

        write_output(&entries, output).map_err(|e| e.to_string())?;
        debug!(entries = entries.len(), "Wrote output document");

        if let Some(accounts_path) = &self.accounts_out {
            let mut file = File::create(accounts_path).map_err(|e| {
                format!(
                    "Failed to create file '{}': {}",
                    accounts_path.display(),
                    e
                )
            })?;
            write_accounts_csv(&engine.accounts(), &mut file)?;
        }

        info!(
            users = engine.users().len(),
            accounts = engine.accounts().len(),
            pending_splits = engine.splits().pending_count(),
            "Simulation finished"
        );
        Ok(())
    }
}
