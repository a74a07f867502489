//! The in-memory input grid.
//!
//! Column identification needs one full pass and extraction needs a
//! second, so the grid is buffered whole and every traversal is
//! restartable and deterministic. Rows may have different lengths
//! (ragged data); consumers must not assume a fixed width.

use patron_model::Cell;

/// An ordered, ragged grid of raw text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row. Shorter rows simply lack trailing cells.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw row access.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Restartable iteration over rows in input order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterates one row as positioned [`Cell`]s.
    pub fn cells(&self, row: usize) -> impl Iterator<Item = Cell<'_>> {
        self.rows
            .get(row)
            .into_iter()
            .flatten()
            .enumerate()
            .map(move |(col, raw)| Cell::new(raw, row, col))
    }

    /// A single cell, or `None` when the row is shorter than `col`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}
