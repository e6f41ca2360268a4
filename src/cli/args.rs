use crate::runner::SimulationRunner;
use clap::Parser;
use std::path::PathBuf;

/// Run a banking ledger simulation
#[derive(Parser, Debug)]
#[command(name = "banking-ledger-sim")]
#[command(about = "Run a banking ledger simulation from a JSON command document", long_about = None)]
pub struct CliArgs {
    /// Input JSON document with users, exchange rates and commands
    #[arg(value_name = "INPUT", help = "Path to the input JSON document")]
    pub input_file: PathBuf,

    /// Extra exchange rates, loaded after the document's own
    #[arg(
        long = "rates",
        value_name = "CSV",
        help = "CSV file with columns from,to,rate,timestamp"
    )]
    pub rates_file: Option<PathBuf>,

    /// Where to write the final account balances
    #[arg(
        long = "accounts-out",
        value_name = "CSV",
        help = "Write a CSV snapshot of every account after the run"
    )]
    pub accounts_out: Option<PathBuf>,

    /// Log verbosity when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log filter: error, warn, info, debug or trace (RUST_LOG takes precedence)"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Build the simulation runner described by these arguments
    pub fn to_runner(&self) -> SimulationRunner {
        SimulationRunner {
            rates_file: self.rates_file.clone(),
            accounts_out: self.accounts_out.clone(),
        }
    }
}
