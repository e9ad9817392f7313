//! Tabular host boundary.
//!
//! The converter and the scoring client only ever talk to a spreadsheet
//! through [`TabularHost`]: read a grid snapshot, write a grid snapshot,
//! apply a per-row fill. `MemoryHost` is the headless implementation used
//! by the CLI and by tests — no GUI dependencies.

use std::collections::BTreeMap;

use crate::cell::CellValue;
use crate::grid::Grid;
use crate::risk::RiskLevel;

/// Which region to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSelector {
    /// Used region of the active sheet.
    ActiveUsedRange,
    /// Used region of a named sheet.
    Sheet(String),
    /// Explicit A1-style address range on the active sheet.
    Address(String),
    /// Current selection.
    Selection,
}

/// Where to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridTarget {
    /// Overwrite at the current selection.
    Selection,
    /// Create a new sheet and write at its origin.
    NewSheet,
    /// Write anchored at an explicit A1 address on the active sheet.
    Address(String),
}

/// Host spreadsheet contract. The write target region is sized to the
/// grid's dimensions; `set_row_fill` colors a full row of the most
/// recently written grid (row 0 is the header, `RiskLevel::None` is a
/// no-op).
pub trait TabularHost {
    fn read_grid(&mut self, selector: &GridSelector) -> Result<Grid, String>;
    fn write_grid(&mut self, target: &GridTarget, grid: &Grid) -> Result<(), String>;
    fn set_row_fill(&mut self, row: usize, level: RiskLevel) -> Result<(), String>;
}

// ── A1 addressing ───────────────────────────────────────────────────

/// Parse an A1 cell reference ("B3") into (row, col), zero-based.
pub fn parse_a1(cell: &str) -> Result<(usize, usize), String> {
    let cell = cell.trim();
    let letters: String = cell.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    let digits = &cell[letters.len()..];

    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid cell reference: {:?}", cell));
    }

    let mut col = 0usize;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }

    let row: usize = digits
        .parse()
        .map_err(|_| format!("invalid cell reference: {:?}", cell))?;
    if row == 0 {
        return Err(format!("invalid cell reference: {:?}", cell));
    }

    Ok((row - 1, col - 1))
}

/// Parse an A1 range ("A1:C3", or a single cell) into
/// ((top, left), (bottom, right)), zero-based inclusive.
pub fn parse_range(address: &str) -> Result<((usize, usize), (usize, usize)), String> {
    match address.split_once(':') {
        Some((start, end)) => {
            let a = parse_a1(start)?;
            let b = parse_a1(end)?;
            Ok((
                (a.0.min(b.0), a.1.min(b.1)),
                (a.0.max(b.0), a.1.max(b.1)),
            ))
        }
        None => {
            let a = parse_a1(address)?;
            Ok((a, a))
        }
    }
}

// ── In-memory host ──────────────────────────────────────────────────

/// Headless tabular store with named sheets and per-row fills.
///
/// Invariant: `sheets` is never empty and `active` always indexes into it.
#[derive(Debug)]
pub struct MemoryHost {
    sheets: Vec<(String, Grid)>,
    active: usize,
    // Region covered by the most recent write: sheet row of the written
    // grid's first row, and how many rows it spans. Fill row indexes are
    // relative to this region.
    write_origin: usize,
    write_rows: usize,
    fills: BTreeMap<usize, RiskLevel>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::with_active(Grid::new())
    }

    /// Host with a single active sheet holding `grid`.
    pub fn with_active(grid: Grid) -> Self {
        let rows = grid.row_count();
        Self {
            sheets: vec![("Sheet1".to_string(), grid)],
            active: 0,
            write_origin: 0,
            write_rows: rows,
            fills: BTreeMap::new(),
        }
    }

    pub fn add_sheet(&mut self, name: impl Into<String>, grid: Grid) {
        self.sheets.push((name.into(), grid));
    }

    pub fn active_grid(&self) -> &Grid {
        &self.sheets[self.active].1
    }

    pub fn active_sheet_name(&self) -> &str {
        &self.sheets[self.active].0
    }

    /// Fills applied since the last write, keyed by absolute sheet row.
    pub fn fills(&self) -> &BTreeMap<usize, RiskLevel> {
        &self.fills
    }

    fn record_write(&mut self, origin: usize, rows: usize) {
        self.write_origin = origin;
        self.write_rows = rows;
        self.fills.clear();
    }
}

impl TabularHost for MemoryHost {
    fn read_grid(&mut self, selector: &GridSelector) -> Result<Grid, String> {
        match selector {
            GridSelector::ActiveUsedRange | GridSelector::Selection => {
                Ok(self.active_grid().clone())
            }
            GridSelector::Sheet(name) => self
                .sheets
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, g)| g.clone())
                .ok_or_else(|| format!("sheet not found: {:?}", name)),
            GridSelector::Address(address) => {
                let ((r0, c0), (r1, c1)) = parse_range(address)?;
                Ok(self.active_grid().slice(r0, c0, r1, c1))
            }
        }
    }

    fn write_grid(&mut self, target: &GridTarget, grid: &Grid) -> Result<(), String> {
        match target {
            GridTarget::Selection => {
                self.sheets[self.active].1 = grid.clone();
                self.record_write(0, grid.row_count());
                Ok(())
            }
            GridTarget::NewSheet => {
                let name = format!("Sheet{}", self.sheets.len() + 1);
                self.sheets.push((name, grid.clone()));
                self.active = self.sheets.len() - 1;
                self.record_write(0, grid.row_count());
                Ok(())
            }
            GridTarget::Address(address) => {
                let ((r0, c0), _) = parse_range(address)?;
                let mut rows = self.active_grid().rows().to_vec();
                for (i, src_row) in grid.rows().iter().enumerate() {
                    let r = r0 + i;
                    if rows.len() <= r {
                        rows.resize(r + 1, Vec::new());
                    }
                    let row = &mut rows[r];
                    if row.len() < c0 + src_row.len() {
                        row.resize(c0 + src_row.len(), CellValue::Empty);
                    }
                    row[c0..c0 + src_row.len()].clone_from_slice(src_row);
                }
                self.sheets[self.active].1 = Grid::from_rows(rows);
                self.record_write(r0, grid.row_count());
                Ok(())
            }
        }
    }

    fn set_row_fill(&mut self, row: usize, level: RiskLevel) -> Result<(), String> {
        if level == RiskLevel::None {
            return Ok(());
        }
        if row >= self.write_rows {
            return Err(format!("row {} is outside the written grid", row));
        }
        self.fills.insert(self.write_origin + row, level);
        Ok(())
    }
}
