use crate::formats::{DelimitedFormatParser, FormatParser};
use crate::{LoadError, Rows};
use std::fs;
use std::path::Path;

/// Loads comma-separated coordinate rows from a file.
///
/// # Arguments
///
/// * `path` - The path to the coordinate file.
///
/// # Returns
///
/// The parsed rows on success, or a `LoadError` if the file cannot be read
/// or contains a malformed line.
pub fn load_from_file(path: &Path) -> Result<Rows, LoadError> {
    load_with_parser(path, &DelimitedFormatParser::new())
}

/// Loads coordinate rows from a file using the given format parser.
pub fn load_with_parser(path: &Path, parser: &dyn FormatParser) -> Result<Rows, LoadError> {
    log::debug!("Reading {:?} as {}", path, parser.format_name());
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|e| LoadError::ParseError(format!("file is not valid UTF-8: {e}")))?;

    let rows = parser.parse(&content)?;
    log::debug!("Loaded {} rows from {:?}", rows.len(), path);
    Ok(rows)
}
