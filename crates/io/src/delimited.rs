//! Permissive comma-delimited import.
//!
//! This is deliberately not an RFC 4180 reader: a double quote always
//! toggles quoted mode on sight (no doubled-quote escape), fields are
//! trimmed of surrounding whitespace, and a quoted field cannot span
//! lines. Anything that needs strict CSV semantics should go through the
//! `csv` crate instead; import stays permissive because the inputs here
//! are hand-edited exports.

use std::io::Read;
use std::path::Path;

use riskgrid_grid::{CellValue, Grid};

/// Parse delimited text into a grid. Lines split on `\n`, each parsed
/// independently; rows whose fields are all empty after trimming are
/// dropped. All values come out as text — no type coercion.
pub fn parse_text(text: &str) -> Grid {
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let fields = parse_line(line);
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(fields.into_iter().map(CellValue::Text).collect());
    }

    Grid::from_rows(rows)
}

/// Character state machine over one line: UNQUOTED ⇄ QUOTED.
/// `"` toggles the state (and is dropped), `,` ends a field only while
/// UNQUOTED, everything else is appended verbatim.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Read a file and parse it. Non-UTF-8 content falls back to
/// Windows-1252, the usual encoding of Excel-exported CSVs.
pub fn import(path: &Path) -> Result<Grid, String> {
    let content = read_file_as_utf8(path)?;
    Ok(parse_text(&content))
}

/// Read file bytes and convert to UTF-8 if needed.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
