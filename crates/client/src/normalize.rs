//! Response envelope normalization.
//!
//! Different environments wrap the scored records differently: some
//! double-encode the whole body as a JSON string, some wrap it in an
//! `output` field (itself sometimes string-encoded), some in `result`,
//! some return the array bare. The dispatch order below is part of the
//! contract — it decides which malformed bodies are rejected versus
//! accepted — so keep it exactly: string, then `output`, then `result`,
//! then the value as-is.

use riskgrid_grid::Record;
use serde_json::Value;

use crate::error::ScoreError;

/// Normalize a raw response body into a non-empty record sequence.
pub fn normalize_response(body: &str) -> Result<Vec<Record>, ScoreError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ScoreError::Parse(e.to_string()))?;

    let candidate = if let Value::String(inner) = &value {
        // Double-encoded body: parse again and use the result directly
        serde_json::from_str(inner).map_err(|e| ScoreError::Parse(e.to_string()))?
    } else if let Some(output) = value.get("output") {
        reparse_if_string(output)?
    } else if let Some(result) = value.get("result") {
        reparse_if_string(result)?
    } else {
        value
    };

    records_from(candidate)
}

/// A wrapper field may itself be string-encoded JSON.
fn reparse_if_string(value: &Value) -> Result<Value, ScoreError> {
    match value {
        Value::String(s) => {
            serde_json::from_str(s).map_err(|e| ScoreError::Parse(e.to_string()))
        }
        other => Ok(other.clone()),
    }
}

fn records_from(value: Value) -> Result<Vec<Record>, ScoreError> {
    let Value::Array(items) = value else {
        return Err(ScoreError::InvalidResponse(
            "expected an array of records".into(),
        ));
    };
    if items.is_empty() {
        return Err(ScoreError::InvalidResponse("no records returned".into()));
    }

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            other => Err(ScoreError::InvalidResponse(format!(
                "expected record objects, found {}",
                type_name(&other)
            ))),
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = r#"[{"id":"a","riskLevel":"HIGH"},{"id":"b","riskLevel":"LOW"}]"#;

    #[test]
    fn test_bare_array() {
        let records = normalize_response(RECORDS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["riskLevel"], "HIGH");
    }

    #[test]
    fn test_double_encoded_string_body() {
        let body = serde_json::to_string(RECORDS).unwrap();
        let records = normalize_response(&body).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_output_field_string_encoded() {
        let body = serde_json::json!({ "output": RECORDS }).to_string();
        let records = normalize_response(&body).unwrap();
        assert_eq!(records[1]["id"], "b");
    }

    #[test]
    fn test_result_field_plain_array() {
        let inner: serde_json::Value = serde_json::from_str(RECORDS).unwrap();
        let body = serde_json::json!({ "result": inner }).to_string();
        let records = normalize_response(&body).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_output_takes_precedence_over_result() {
        let inner: serde_json::Value = serde_json::from_str(RECORDS).unwrap();
        let body = serde_json::json!({
            "output": inner,
            "result": [{"id": "wrong"}],
        })
        .to_string();
        let records = normalize_response(&body).unwrap();
        assert_eq!(records[0]["id"], "a");
    }

    #[test]
    fn test_empty_array_rejected() {
        let err = normalize_response("[]").unwrap_err();
        assert!(matches!(err, ScoreError::InvalidResponse(_)));
    }

    #[test]
    fn test_non_array_rejected() {
        let err = normalize_response(r#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidResponse(_)));
    }

    #[test]
    fn test_array_of_scalars_rejected() {
        let err = normalize_response("[1,2,3]").unwrap_err();
        assert!(matches!(err, ScoreError::InvalidResponse(_)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = normalize_response("not json").unwrap_err();
        assert!(matches!(err, ScoreError::Parse(_)));
    }

    #[test]
    fn test_garbage_inside_output_is_parse_error() {
        let body = serde_json::json!({ "output": "{{nope" }).to_string();
        let err = normalize_response(&body).unwrap_err();
        assert!(matches!(err, ScoreError::Parse(_)));
    }
}
