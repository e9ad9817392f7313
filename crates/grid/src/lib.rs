// Tabular core - grids, records, contextual conversion, risk classification

pub mod cell;
pub mod convert;
pub mod grid;
pub mod host;
pub mod risk;

pub use cell::CellValue;
pub use convert::{to_grid, to_records, Record};
pub use grid::Grid;
pub use host::{GridSelector, GridTarget, MemoryHost, TabularHost};
pub use risk::RiskLevel;
