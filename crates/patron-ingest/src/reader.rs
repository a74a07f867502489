//! Delimited-text reading into a [`Grid`].
//!
//! Rows are read with `flexible(true)` so ragged input is preserved as
//! ragged rather than padded or rejected. Cells are trimmed and stripped
//! of a UTF-8 BOM. An optional heuristic drops a leading header row,
//! since registration exports sometimes carry one and sometimes do not.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::delimiter::sniff_delimiter;
use crate::error::{IngestError, Result};
use crate::grid::Grid;

/// What to do about a possible header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// Drop the first row when it looks like labels rather than data.
    #[default]
    Auto,
    /// Always drop the first row.
    Skip,
    /// Never drop anything.
    Keep,
}

/// Options for grid ingestion.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Explicit delimiter; sniffed from the data when `None`.
    pub delimiter: Option<u8>,
    pub header: HeaderMode,
}

/// Reads a grid with default options.
pub fn read_grid(path: &Path) -> Result<Grid> {
    read_grid_with_options(path, IngestOptions::default())
}

/// Reads a delimited text file into a [`Grid`].
pub fn read_grid_with_options(path: &Path, options: IngestOptions) -> Result<Grid> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Single-column exports carry no separator at all; they still read
    // fine as a one-wide grid under the comma default.
    let delimiter = match options.delimiter {
        Some(d) => d,
        None => sniff_delimiter(&text).unwrap_or_else(|| {
            debug!("no delimiter detected, defaulting to comma");
            b','
        }),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        // A fully blank line carries no information.
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }

    let skip_first = match options.header {
        HeaderMode::Skip => !rows.is_empty(),
        HeaderMode::Auto => rows.first().is_some_and(|row| looks_like_header(row)),
        HeaderMode::Keep => false,
    };
    if skip_first {
        debug!("dropping header row: {:?}", rows[0]);
        rows.remove(0);
    }

    if rows.is_empty() {
        return Err(IngestError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let grid = Grid::new(rows);
    info!(
        rows = grid.row_count(),
        width = grid.width(),
        delimiter = %(delimiter as char),
        "ingested grid"
    );
    Ok(grid)
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// A header row is fully populated, alphabetic, and free of the digits,
/// `@`, and embedded separators real customer data carries.
fn looks_like_header(row: &[String]) -> bool {
    if row.is_empty() {
        return false;
    }
    row.iter().all(|cell| {
        !cell.is_empty()
            && !cell.contains('@')
            && !cell.chars().any(|ch| ch.is_ascii_digit())
            && cell.split_whitespace().count() <= 2
            && cell.chars().next().is_some_and(char::is_alphabetic)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp");
        file
    }

    #[test]
    fn reads_ragged_rows_without_error() {
        let file = write_temp("a,b,c\n555-0100,jane@x.com\n");
        let grid = read_grid_with_options(
            file.path(),
            IngestOptions {
                delimiter: Some(b','),
                header: HeaderMode::Keep,
            },
        )
        .unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.row(1).unwrap().len(), 2);
    }

    #[test]
    fn auto_mode_drops_label_row() {
        let file = write_temp("First Name,Email\nJane,jane@x.com\nBob,bob@y.com\n");
        let grid = read_grid(file.path()).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(0, 0), Some("Jane"));
    }

    #[test]
    fn auto_mode_keeps_data_row() {
        let file = write_temp("Jane,jane@x.com\nBob,bob@y.com\n");
        let grid = read_grid(file.path()).unwrap();
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn single_column_input_falls_back_to_comma() {
        let file = write_temp("jane@x.com\nbob@y.org\n");
        let grid = read_grid(file.path()).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.cell(1, 0), Some("bob@y.org"));
    }

    #[test]
    fn header_only_input_is_empty() {
        let file = write_temp("First Name,Email\n");
        let err = read_grid(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyInput { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_grid(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
