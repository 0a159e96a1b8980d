use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

/// A pest report near the farm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PestAlert {
    pub id: u32,
    pub title: String,
    pub severity: Severity,
    /// Date the pest was detected.
    pub date: NaiveDate,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Alerts shown until a real feed replaces them.
pub fn seed_pest_alerts() -> Vec<PestAlert> {
    vec![
        PestAlert {
            id: 1,
            title: "Brown Plant Hopper - Nearby".to_string(),
            severity: Severity::High,
            date: date(2025, 9, 18),
        },
        PestAlert {
            id: 2,
            title: "Stem borer reports increasing".to_string(),
            severity: Severity::Medium,
            date: date(2025, 9, 15),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_alerts_have_distinct_ids() {
        let alerts = seed_pest_alerts();
        assert_eq!(alerts.len(), 2);
        assert_ne!(alerts[0].id, alerts[1].id);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[1].date.to_string(), "2025-09-15");
    }

    #[test]
    fn severity_serializes_lowercase() {
        let v = serde_json::to_value(Severity::Medium).unwrap();
        assert_eq!(v, "medium");
        assert!(Severity::High > Severity::Low);
    }
}
