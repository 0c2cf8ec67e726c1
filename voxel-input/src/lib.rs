//! Loading of voxel coordinate files.
//!
//! A coordinate file holds one record per line, each record a list of
//! delimiter-separated base-10 integers. Loading produces the raw rows; turning
//! them into coordinates is left to `voxel-core`.

use thiserror::Error;

pub mod formats;
pub mod loader;

pub use formats::{DelimitedFormatParser, FormatParser};
pub use loader::{load_from_file, load_with_parser};

/// Parsed records, one `Vec<i64>` per non-blank input line.
pub type Rows = Vec<Vec<i64>>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse coordinate data: {0}")]
    ParseError(String),
    #[error("Invalid coordinate data: {0}")]
    InvalidData(String),
}
