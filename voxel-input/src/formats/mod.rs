//! Module defining parsers for coordinate file formats.

// Export the core parser trait
pub mod parser;
pub use parser::FormatParser;

// Format-specific implementations
pub mod delimited_format;
pub use delimited_format::DelimitedFormatParser;
