//! Risk classification — maps a scored record's risk attributes to a
//! discrete fill category.
//!
//! Check order is load-bearing: High before Medium before Low, and the
//! numeric score outranks the label within each tier. A record labelled
//! LOW with fraudScore 0.5 is Medium, not Low.

use crate::convert::Record;

pub const RISK_LEVEL_KEY: &str = "riskLevel";
pub const FRAUD_SCORE_KEY: &str = "fraudScore";

const HIGH_SCORE_THRESHOLD: f64 = 0.7;
const MEDIUM_SCORE_THRESHOLD: f64 = 0.3;

/// Visual category for one scored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    /// No visual treatment.
    None,
}

impl RiskLevel {
    /// Classify one scored record from its `riskLevel` (categorical) and
    /// `fraudScore` (numeric in [0,1], absent reads as 0) attributes.
    pub fn classify(record: &Record) -> RiskLevel {
        let level = record
            .get(RISK_LEVEL_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let score = record
            .get(FRAUD_SCORE_KEY)
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        if level == "HIGH" || score > HIGH_SCORE_THRESHOLD {
            RiskLevel::High
        } else if level == "MEDIUM" || score > MEDIUM_SCORE_THRESHOLD {
            RiskLevel::Medium
        } else if level == "LOW" && score == 0.0 {
            RiskLevel::Low
        } else {
            RiskLevel::None
        }
    }

    /// Row fill color as #RRGGBB, None for no treatment.
    pub fn fill_color(&self) -> Option<&'static str> {
        match self {
            RiskLevel::High => Some("#FFCCCC"),   // light red
            RiskLevel::Medium => Some("#FFE5CC"), // light orange
            RiskLevel::Low => Some("#CCFFCC"),    // light green
            RiskLevel::None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::None => "NONE",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a scored dataset carries the risk-level attribute at all.
/// When it doesn't, per-row formatting is skipped for the whole dataset.
pub fn has_risk_fields(records: &[Record]) -> bool {
    records.iter().any(|r| r.contains_key(RISK_LEVEL_KEY))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, serde_json::Value)]) -> Record {
        let mut r = Record::new();
        for (k, v) in pairs {
            r.insert((*k).into(), v.clone());
        }
        r
    }

    #[test]
    fn test_high_label_wins_over_low_score() {
        let r = record(&[
            ("riskLevel", serde_json::json!("HIGH")),
            ("fraudScore", serde_json::json!(0.1)),
        ]);
        assert_eq!(RiskLevel::classify(&r), RiskLevel::High);
    }

    #[test]
    fn test_high_score_wins_over_low_label() {
        let r = record(&[
            ("riskLevel", serde_json::json!("LOW")),
            ("fraudScore", serde_json::json!(0.9)),
        ]);
        assert_eq!(RiskLevel::classify(&r), RiskLevel::High);
    }

    #[test]
    fn test_medium_score_outranks_low_label() {
        let r = record(&[
            ("riskLevel", serde_json::json!("LOW")),
            ("fraudScore", serde_json::json!(0.5)),
        ]);
        assert_eq!(RiskLevel::classify(&r), RiskLevel::Medium);
    }

    #[test]
    fn test_low_requires_zero_score() {
        let low = record(&[
            ("riskLevel", serde_json::json!("LOW")),
            ("fraudScore", serde_json::json!(0)),
        ]);
        assert_eq!(RiskLevel::classify(&low), RiskLevel::Low);

        let not_low = record(&[
            ("riskLevel", serde_json::json!("LOW")),
            ("fraudScore", serde_json::json!(0.1)),
        ]);
        assert_eq!(RiskLevel::classify(&not_low), RiskLevel::None);
    }

    #[test]
    fn test_medium_label_with_zero_score() {
        let r = record(&[
            ("riskLevel", serde_json::json!("MEDIUM")),
            ("fraudScore", serde_json::json!(0)),
        ]);
        assert_eq!(RiskLevel::classify(&r), RiskLevel::Medium);
    }

    #[test]
    fn test_missing_level_and_zero_score_is_none() {
        let r = record(&[("fraudScore", serde_json::json!(0))]);
        assert_eq!(RiskLevel::classify(&r), RiskLevel::None);
    }

    #[test]
    fn test_missing_score_reads_as_zero() {
        let r = record(&[("riskLevel", serde_json::json!("LOW"))]);
        assert_eq!(RiskLevel::classify(&r), RiskLevel::Low);
    }

    #[test]
    fn test_has_risk_fields() {
        let with = record(&[("riskLevel", serde_json::json!("LOW"))]);
        let without = record(&[("fraudScore", serde_json::json!(0))]);
        assert!(has_risk_fields(&[without.clone(), with]));
        assert!(!has_risk_fields(&[without]));
        assert!(!has_risk_fields(&[]));
    }

    #[test]
    fn test_fill_colors() {
        assert_eq!(RiskLevel::High.fill_color(), Some("#FFCCCC"));
        assert_eq!(RiskLevel::Medium.fill_color(), Some("#FFE5CC"));
        assert_eq!(RiskLevel::Low.fill_color(), Some("#CCFFCC"));
        assert_eq!(RiskLevel::None.fill_color(), None);
    }
}
