//! Contextual conversion — the Grid↔Record transform pair.
//!
//! A record re-expresses one data row as a header-keyed mapping. Key order
//! is meaningful (it is the column order), which is why `Record` is the
//! order-preserving `serde_json::Map`.

use crate::cell::CellValue;
use crate::grid::Grid;

/// One row keyed by header names, in column order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Convert a grid to records. Row 0 supplies the keys; each data row is
/// zipped against them. A short row fills the remaining keys with null,
/// extra cells beyond the header width are dropped — never an error.
/// An empty or header-only grid yields an empty sequence.
pub fn to_records(grid: &Grid) -> Vec<Record> {
    let headers = grid.header_names();
    if headers.is_empty() {
        return Vec::new();
    }

    grid.data_rows()
        .iter()
        .map(|row| {
            let mut record = Record::new();
            for (i, name) in headers.iter().enumerate() {
                let value = row
                    .get(i)
                    .map(CellValue::to_json)
                    .unwrap_or(serde_json::Value::Null);
                record.insert(name.clone(), value);
            }
            record
        })
        .collect()
}

/// Convert records back to a grid. The header row is the key order of the
/// *first* record; all records are assumed to share that key set (this is
/// true by construction for anything `to_records` produced and is not
/// re-verified). Values are taken by key lookup, absent keys become Empty.
///
/// Empty input returns an empty grid — callers that need a header row must
/// check for non-emptiness first.
pub fn to_grid(records: &[Record]) -> Grid {
    let Some(first) = records.first() else {
        return Grid::new();
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(
        headers
            .iter()
            .map(|h| CellValue::Text(h.clone()))
            .collect(),
    );

    for record in records {
        rows.push(
            headers
                .iter()
                .map(|h| {
                    record
                        .get(h)
                        .map(CellValue::from_json)
                        .unwrap_or(CellValue::Empty)
                })
                .collect(),
        );
    }

    Grid::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    fn grid(rows: Vec<Vec<CellValue>>) -> Grid {
        Grid::from_rows(rows)
    }

    #[test]
    fn test_to_records_zips_headers() {
        let g = grid(vec![
            vec![text("name"), text("amount")],
            vec![text("alice"), CellValue::Number(10.0)],
            vec![text("bob"), CellValue::Number(20.0)],
        ]);
        let records = to_records(&g);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], serde_json::json!("alice"));
        assert_eq!(records[1]["amount"], serde_json::json!(20.0));
        // Key order follows column order
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, ["name", "amount"]);
    }

    #[test]
    fn test_to_records_short_row_fills_null_extra_dropped() {
        let g = grid(vec![
            vec![text("a"), text("b")],
            vec![text("1")],
            vec![text("2"), text("3"), text("EXTRA")],
        ]);
        let records = to_records(&g);
        assert_eq!(records[0]["b"], serde_json::Value::Null);
        assert_eq!(records[1].len(), 2);
        assert!(!records[1].values().any(|v| *v == "EXTRA"));
    }

    #[test]
    fn test_to_records_empty_and_header_only() {
        assert!(to_records(&Grid::new()).is_empty());
        let header_only = grid(vec![vec![text("a"), text("b")]]);
        assert!(to_records(&header_only).is_empty());
    }

    #[test]
    fn test_to_grid_derives_header_from_first_record() {
        let mut r = Record::new();
        r.insert("x".into(), serde_json::json!(1.0));
        r.insert("y".into(), serde_json::json!("two"));
        let g = to_grid(&[r]);
        assert_eq!(g.header_names(), vec!["x", "y"]);
        assert_eq!(g.rows()[1][0], CellValue::Number(1.0));
        assert_eq!(g.rows()[1][1], text("two"));
    }

    #[test]
    fn test_to_grid_empty_input_is_empty_grid() {
        assert!(to_grid(&[]).is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_grid() {
        let g = grid(vec![
            vec![text("id"), text("score"), text("ok")],
            vec![text("a"), CellValue::Number(0.5), CellValue::Bool(true)],
            vec![text("b"), CellValue::Empty, CellValue::Bool(false)],
        ]);
        assert_eq!(to_grid(&to_records(&g)), g);
    }
}
