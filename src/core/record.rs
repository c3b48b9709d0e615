//! The financial record model shared by the record store and the
//! aggregation engine.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned to records submitted without one.
pub const UNSPECIFIED_CATEGORY: &str = "Unspecified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

/// A single income or expense entry. Immutable once created; the core
/// only ever reads these.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Record {
    pub id: String,
    pub owner_id: String,
    pub kind: RecordKind,
    /// Decimal string as stored at rest; parsed to f64 for arithmetic.
    pub amount: String,
    pub currency: String,
    #[serde(default)]
    pub category: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Record {
    /// Parses the stored decimal string into an f64 for arithmetic.
    pub fn amount_value(&self) -> Result<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .map_err(|e| anyhow!("Invalid amount '{}' on record {}: {}", self.amount, self.id, e))
    }

    /// The record's category, with empty/absent normalized to
    /// [`UNSPECIFIED_CATEGORY`].
    pub fn category_or_default(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNSPECIFIED_CATEGORY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(amount: &str, category: Option<&str>) -> Record {
        Record {
            id: "r1".to_string(),
            owner_id: "alice".to_string(),
            kind: RecordKind::Expense,
            amount: amount.to_string(),
            currency: "USD".to_string(),
            category: category.map(str::to_string),
            timestamp: Utc.with_ymd_and_hms(2023, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_amount_parsing() {
        assert_eq!(record("10.50", None).amount_value().unwrap(), 10.5);
        assert_eq!(record(" 3 ", None).amount_value().unwrap(), 3.0);
        assert!(record("ten", None).amount_value().is_err());
        assert!(record("", None).amount_value().is_err());
    }

    #[test]
    fn test_category_defaulting() {
        assert_eq!(record("1", None).category_or_default(), UNSPECIFIED_CATEGORY);
        assert_eq!(record("1", Some("")).category_or_default(), UNSPECIFIED_CATEGORY);
        assert_eq!(record("1", Some("  ")).category_or_default(), UNSPECIFIED_CATEGORY);
        assert_eq!(record("1", Some("food")).category_or_default(), "food");
    }

    #[test]
    fn test_record_deserialization() {
        let yaml_str = r#"
id: "rec-42"
owner_id: "bob"
kind: income
amount: "1200.00"
currency: "EUR"
timestamp: "2023-03-15T09:30:00Z"
"#;
        let rec: Record = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(rec.kind, RecordKind::Income);
        assert_eq!(rec.amount_value().unwrap(), 1200.0);
        assert!(rec.category.is_none());
    }
}
