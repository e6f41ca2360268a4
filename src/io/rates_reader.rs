//! Streaming reader for exchange-rate CSV files
//!
//! Provides an iterator over rate edges from a CSV file with the header
//! `from,to,rate,timestamp`. Delegates CSV format concerns to the csv_format
//! module.
//!
//! ```no_run
//! use banking_ledger_sim::io::rates_reader::RatesReader;
//! use std::path::Path;
//!
//! let reader = RatesReader::new(Path::new("rates.csv")).unwrap();
//! let edges: Vec<_> = reader.filter_map(Result::ok).collect();
//! println!("Loaded {} rates", edges.len());
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator,
//!   with the file line number included

use crate::core::rate_graph::RateEdge;
use crate::io::csv_format::{convert_rate_record, RateCsvRecord};
use crate::types::LedgerError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous rate file reader
#[derive(Debug)]
pub struct RatesReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl RatesReader {
    /// Open a rate file
    ///
    /// The CSV reader trims whitespace from all fields and accepts rows
    /// without a timestamp column.
    ///
    /// # Returns
    ///
    /// * `Ok(RatesReader)` if the file opened successfully
    /// * `Err(LedgerError::FileNotFound)` if the path does not exist
    /// * `Err(LedgerError::IoError)` for any other open failure
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::from(e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for RatesReader {
    type Item = Result<RateEdge, String>;

    /// Get the next rate edge from the file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(RateEdge))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<RateCsvRecord>();
        let result = deserializer.next()?;
        self.line_num += 1;

        Some(match result {
            Ok(csv_record) => {
                convert_rate_record(csv_record).map_err(|e| format!("Line {}: {}", self.line_num, e))
            }
            Err(e) => Err(format!("Line {}: CSV parse error: {}", self.line_num, e)),
        })
    }
}
