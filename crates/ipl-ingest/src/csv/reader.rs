//! Raw CSV reading.
//!
//! Produces a [`RawTable`] of untyped string cells. No cleaning happens here
//! beyond header normalization; coercion and deduplication live in
//! [`crate::clean`].

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// A parsed but uncleaned table: one header row and string cells.
///
/// Every row has exactly `headers.len()` cells; short source rows are padded
/// with empty cells and long rows are truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Reads a source file into memory.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses CSV bytes into a [`RawTable`].
///
/// The first non-blank record is the header row. Fully blank records are
/// skipped.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] when the bytes are not valid CSV (for
/// example invalid UTF-8) and [`IngestError::EmptySource`] when no header
/// row exists.
pub fn read_raw_table(source: &[u8]) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if headers.is_none() {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    let headers = headers.ok_or(IngestError::EmptySource)?;
    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "read raw table"
    );
    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_whitespace_and_bom_are_normalized() {
        assert_eq!(normalize_header("\u{feff}Player_Name"), "Player_Name");
        assert_eq!(normalize_header("  Runs   Scored "), "Runs Scored");
    }

    #[test]
    fn rows_are_padded_and_truncated_to_header_width() {
        let table = read_raw_table(b"A,B,C\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn blank_leading_lines_are_skipped() {
        let table = read_raw_table(b"\n,,\nA,B\n1,2\n").unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn quoted_cells_keep_commas() {
        let table = read_raw_table(b"Player_Name,Year\n\"Kohli, V\",2016\n").unwrap();
        assert_eq!(table.rows[0][0], "Kohli, V");
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(matches!(read_raw_table(b""), Err(IngestError::EmptySource)));
        assert!(matches!(
            read_raw_table(b"\n\n"),
            Err(IngestError::EmptySource)
        ));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let result = read_raw_table(b"Player_Name,Year\n\xff\xfe,2020\n");
        assert!(matches!(result, Err(IngestError::Csv(_))));
    }
}
