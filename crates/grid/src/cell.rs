use serde::{Deserialize, Serialize};

/// A single grid cell value.
///
/// Host ranges hand back text, numbers, booleans, or blanks; everything
/// else (nested arrays/objects from a scoring response) is flattened to
/// its JSON text when it enters a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    /// Display form used for headers and text export.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => {
                if *b { "true".into() } else { "false".into() }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
            || matches!(self, CellValue::Text(s) if s.is_empty())
    }

    /// Convert to the JSON value carried inside a record.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Empty => serde_json::Value::Null,
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    /// Convert a record value into a cell. Arrays and objects are
    /// flattened to their JSON text so the grid stays scalar.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Empty,
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            serde_json::Value::Number(n) => {
                CellValue::Number(n.as_f64().unwrap_or(0.0))
            }
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            other => CellValue::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_drops_trailing_zero_fraction() {
        assert_eq!(CellValue::Number(42.0).display(), "42");
        assert_eq!(CellValue::Number(0.73).display(), "0.73");
    }

    #[test]
    fn test_json_roundtrip() {
        for v in [
            CellValue::Empty,
            CellValue::Text("x".into()),
            CellValue::Number(1.5),
            CellValue::Bool(true),
        ] {
            assert_eq!(CellValue::from_json(&v.to_json()), v);
        }
    }

    #[test]
    fn test_nested_json_flattens_to_text() {
        let v = serde_json::json!({"a": 1});
        assert_eq!(
            CellValue::from_json(&v),
            CellValue::Text("{\"a\":1}".into())
        );
    }
}
