use crate::{LoadError, Rows};

/// Trait defining the interface for format-specific coordinate parsers.
///
/// Implementors turn the full text of a coordinate file into integer rows.
pub trait FormatParser {
    /// Parses file content into rows of integers.
    ///
    /// # Arguments
    ///
    /// * `content` - A string slice containing the whole file
    ///
    /// # Returns
    ///
    /// * `Ok(Rows)` - One row per non-blank line, in file order
    /// * `Err(LoadError)` - Error encountered during parsing
    fn parse(&self, content: &str) -> Result<Rows, LoadError>;

    /// Returns a descriptive name for this parser format.
    ///
    /// This can be used for debugging, logging, or user-facing error messages.
    fn format_name(&self) -> &'static str;
}
