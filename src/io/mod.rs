//! I/O module
//!
//! Handles reading the simulation input and writing its results.
//!
//! # Components
//!
//! - `json_format` - Input document decoding and output document building
//! - `csv_format` - Rate record conversion and account snapshot serialization
//! - `rates_reader` - Streaming reader for exchange-rate CSV files

pub mod csv_format;
pub mod json_format;
pub mod rates_reader;

pub use csv_format::{convert_rate_record, write_accounts_csv, RateCsvRecord};
pub use json_format::{decode_command, output_entry, read_document, write_output, InputDocument};
pub use rates_reader::RatesReader;
