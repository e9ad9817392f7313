// CSV export

use std::path::Path;

use riskgrid_grid::Grid;

/// Write a grid as comma-delimited text. Output goes through the `csv`
/// crate, so fields containing commas or quotes are properly quoted —
/// strictness on the way out, permissiveness on the way in.
pub fn export(grid: &Grid, path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;
    write_rows(grid, &mut writer)?;
    writer.flush().map_err(|e| e.to_string())
}

/// Same as [`export`] but into a string, for stdout output.
pub fn export_string(grid: &Grid) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    write_rows(grid, &mut writer)?;
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

fn write_rows<W: std::io::Write>(
    grid: &Grid,
    writer: &mut csv::Writer<W>,
) -> Result<(), String> {
    for row in grid.rows() {
        let record: Vec<String> = row.iter().map(|c| c.display()).collect();
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskgrid_grid::CellValue;
    use tempfile::tempdir;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[test]
    fn test_export_string_quotes_embedded_commas() {
        let g = Grid::from_rows(vec![
            vec![text("name"), text("memo")],
            vec![text("alice"), text("a, b")],
        ]);
        let out = export_string(&g).unwrap();
        assert_eq!(out, "name,memo\nalice,\"a, b\"\n");
    }

    #[test]
    fn test_export_file_roundtrips_through_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let g = Grid::from_rows(vec![
            vec![text("id"), text("score")],
            vec![text("a"), CellValue::Number(0.73)],
        ]);
        export(&g, &path).unwrap();

        let back = crate::delimited::import(&path).unwrap();
        assert_eq!(back.rows()[1][1], text("0.73"));
    }

    #[test]
    fn test_export_empty_values() {
        let g = Grid::from_rows(vec![
            vec![text("a"), text("b")],
            vec![CellValue::Empty, text("x")],
        ]);
        let out = export_string(&g).unwrap();
        assert_eq!(out, "a,b\n,x\n");
    }
}
