use crate::formats::FormatParser;
use crate::{LoadError, Rows};

/// A parser for delimiter-separated integer records (comma by default).
///
/// Blank lines are skipped. Tokens are parsed exactly as written: surrounding
/// whitespace, quotes, or an empty field (e.g. from a trailing delimiter) are
/// rejected. Every record must have the same number of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedFormatParser {
    delimiter: u8,
}

impl Default for DelimitedFormatParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DelimitedFormatParser {
    /// Creates a comma-separated parser.
    pub const fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Creates a parser splitting on `delimiter`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidData` if the delimiter is not a single-byte
    /// character, or is a digit, sign or line break (any of which would make
    /// records ambiguous).
    pub fn with_delimiter(delimiter: char) -> Result<Self, LoadError> {
        let byte = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                LoadError::InvalidData(format!("Delimiter must be ASCII, got {delimiter:?}"))
            })?;
        if byte.is_ascii_digit() || matches!(byte, b'-' | b'+' | b'\n' | b'\r') {
            return Err(LoadError::InvalidData(format!(
                "Delimiter {delimiter:?} cannot separate integer fields"
            )));
        }
        Ok(Self { delimiter: byte })
    }

    pub const fn delimiter(&self) -> char {
        self.delimiter as char
    }
}

impl FormatParser for DelimitedFormatParser {
    fn format_name(&self) -> &'static str {
        "Delimiter-separated integers"
    }

    fn parse(&self, content: &str) -> Result<Rows, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .flexible(false)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error_to_load_error)?;
            let line = record.position().map_or(0, csv::Position::line);

            let row = record
                .iter()
                .map(|field| {
                    field.parse::<i64>().map_err(|e| {
                        LoadError::ParseError(format!(
                            "line {line}: invalid integer {field:?} ({e})"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        log::trace!("Parsed {} rows", rows.len());
        Ok(rows)
    }
}

fn csv_error_to_load_error(error: csv::Error) -> LoadError {
    let line = error.position().map_or(0, csv::Position::line);
    match error.into_kind() {
        csv::ErrorKind::Io(e) => LoadError::Io(e),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => LoadError::InvalidData(format!(
            "line {line}: found {len} field(s), expected {expected_len} like the previous lines"
        )),
        csv::ErrorKind::Utf8 { err, .. } => {
            LoadError::ParseError(format!("line {line}: invalid UTF-8 ({err})"))
        }
        other => LoadError::ParseError(format!("line {line}: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let rows = DelimitedFormatParser::new().parse("1,1,1\n2,2,2\n").unwrap();
        assert_eq!(rows, vec![vec![1, 1, 1], vec![2, 2, 2]]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let rows = DelimitedFormatParser::new()
            .parse("\n1,2,3\n\n4,5,6\n\n")
            .unwrap();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = DelimitedFormatParser::new().parse("1,2,3\r\n4,5,6\r\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![4, 5, 6]);
    }

    #[test]
    fn test_whitespace_is_rejected() {
        let err = DelimitedFormatParser::new().parse("1, 2,3\n").unwrap_err();
        match err {
            LoadError::ParseError(msg) => {
                assert!(msg.contains("line 1"), "{msg}");
                assert!(msg.contains("\" 2\""), "{msg}");
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_delimiter_is_rejected() {
        let err = DelimitedFormatParser::new().parse("1,2,3,\n").unwrap_err();
        assert!(matches!(err, LoadError::ParseError(_)));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = DelimitedFormatParser::new()
            .parse("1,2,3\n4,5,6,7\n")
            .unwrap_err();
        match err {
            LoadError::InvalidData(msg) => {
                assert!(msg.contains("line 2"), "{msg}");
                assert!(msg.contains("found 4"), "{msg}");
            }
            other => panic!("Expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = DelimitedFormatParser::with_delimiter(';').unwrap();
        assert_eq!(parser.delimiter(), ';');
        let rows = parser.parse("3;2;1\n").unwrap();
        assert_eq!(rows, vec![vec![3, 2, 1]]);
    }

    #[test]
    fn test_invalid_delimiters() {
        assert!(DelimitedFormatParser::with_delimiter('5').is_err());
        assert!(DelimitedFormatParser::with_delimiter('-').is_err());
        assert!(DelimitedFormatParser::with_delimiter('é').is_err());
    }

    #[test]
    fn test_empty_content() {
        let rows = DelimitedFormatParser::new().parse("").unwrap();
        assert!(rows.is_empty());
    }
}
