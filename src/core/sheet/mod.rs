//! Spreadsheet text parsing

pub mod csv_parser;

pub use csv_parser::{parse_csv, RawRecord};
