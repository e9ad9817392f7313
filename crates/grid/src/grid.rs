//! Header-first tabular value matrix.
//!
//! A `Grid` is an immutable snapshot: hosts produce one on read and consume
//! one on write. Transforms return new grids instead of mutating in place,
//! so the read-phase grid and the write-phase grid never alias.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Ordered rows of ordered cell values. Row 0, when present, is the
/// header row. Ragged data rows are tolerated here; the converter defines
/// what happens to missing/extra cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the header row (0 for an empty grid).
    pub fn col_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Header names as display strings. Empty when the grid has no rows.
    pub fn header_names(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|r| r.iter().map(CellValue::display).collect())
            .unwrap_or_default()
    }

    /// Data rows (everything below the header).
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }

    /// Rectangular sub-grid: rows r0..=r1, cols c0..=c1 (clamped to the
    /// grid's extent, missing cells read as Empty).
    pub fn slice(&self, r0: usize, c0: usize, r1: usize, c1: usize) -> Grid {
        let mut rows = Vec::new();
        for r in r0..=r1 {
            let Some(src) = self.rows.get(r) else { break };
            let row = (c0..=c1)
                .map(|c| src.get(c).cloned().unwrap_or(CellValue::Empty))
                .collect();
            rows.push(row);
        }
        Grid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[test]
    fn test_header_names_and_data_rows() {
        let g = Grid::from_rows(vec![
            vec![text("id"), text("amount")],
            vec![text("1"), CellValue::Number(10.0)],
        ]);
        assert_eq!(g.header_names(), vec!["id", "amount"]);
        assert_eq!(g.data_rows().len(), 1);
        assert_eq!(g.col_count(), 2);
    }

    #[test]
    fn test_empty_grid_has_no_headers() {
        let g = Grid::new();
        assert!(g.is_empty());
        assert!(g.header_names().is_empty());
        assert!(g.data_rows().is_empty());
    }

    #[test]
    fn test_slice_pads_missing_cells() {
        let g = Grid::from_rows(vec![
            vec![text("a"), text("b"), text("c")],
            vec![text("1")],
        ]);
        let s = g.slice(0, 1, 1, 2);
        assert_eq!(
            s.rows(),
            &[
                vec![text("b"), text("c")],
                vec![CellValue::Empty, CellValue::Empty],
            ]
        );
    }
}
