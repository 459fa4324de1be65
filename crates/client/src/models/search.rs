//! Ariel search models.
//!
//! Responsibilities:
//! - Deserialize search creation and status responses.
//! - Map the console's status vocabulary onto lifecycle states.
//!
//! Invariants:
//! - Unknown status strings are kept verbatim and treated as still running.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single result row: field name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Status of an Ariel search as reported by the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Wait,
    Execute,
    Sorting,
    Completed,
    Canceled,
    Error,
    /// A status string this client does not know; treated as running.
    Other(String),
}

impl SearchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wait => "WAIT",
            Self::Execute => "EXECUTE",
            Self::Sorting => "SORTING",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::Error => "ERROR",
            Self::Other(s) => s,
        }
    }

    /// True once the search will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::Error)
    }

    /// True for the terminal states that carry no results.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Canceled | Self::Error)
    }
}

impl From<&str> for SearchStatus {
    fn from(s: &str) -> Self {
        match s {
            "WAIT" => Self::Wait,
            "EXECUTE" => Self::Execute,
            "SORTING" => Self::Sorting,
            "COMPLETED" => Self::Completed,
            "CANCELED" => Self::Canceled,
            "ERROR" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SearchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SearchStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

/// Accept integer, fractional or numeric-string percents.
fn lenient_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    })
}

/// Status response for `GET /api/ariel/searches/{search_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchInfo {
    #[serde(default)]
    pub search_id: Option<String>,
    pub status: SearchStatus,
    /// Percent complete, informational only. Values that are not numbers
    /// are read as `None` instead of failing the status request.
    #[serde(default, deserialize_with = "lenient_percent")]
    pub progress: Option<f64>,
    #[serde(default)]
    pub record_count: Option<u64>,
}

/// A submitted search owned by the lifecycle controller.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchJob {
    pub search_id: String,
    /// Status reported in the creation response, `WAIT` when the console
    /// omits it. Informational only: the lifecycle reads state from polls.
    pub status: SearchStatus,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(SearchStatus::from("WAIT"), SearchStatus::Wait);
        assert_eq!(SearchStatus::from("SORTING"), SearchStatus::Sorting);
        assert!(SearchStatus::from("COMPLETED").is_terminal());
        assert!(SearchStatus::from("CANCELED").is_failure());
        assert!(SearchStatus::from("ERROR").is_failure());
        assert!(!SearchStatus::from("EXECUTE").is_terminal());
    }

    #[test]
    fn test_unknown_status_is_running() {
        let status = SearchStatus::from("PAUSED");
        assert!(!status.is_terminal());
        assert_eq!(status.to_string(), "PAUSED");
    }

    #[test]
    fn test_search_info_deserialize() {
        let json = serde_json::json!({
            "search_id": "abc",
            "status": "EXECUTE",
            "progress": 42,
            "record_count": 1000,
            "query_string": "SELECT * FROM events"
        });
        let info: SearchInfo = serde_json::from_value(json).unwrap();
        assert_eq!(info.status, SearchStatus::Execute);
        assert_eq!(info.progress, Some(42.0));
        assert_eq!(info.search_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_search_info_fractional_progress() {
        let json = serde_json::json!({ "status": "COMPLETED", "progress": 99.5 });
        let info: SearchInfo = serde_json::from_value(json).unwrap();
        assert_eq!(info.status, SearchStatus::Completed);
        assert_eq!(info.progress, Some(99.5));
    }

    #[test]
    fn test_search_info_unreadable_progress_is_none() {
        let cases = [
            (serde_json::json!("12.5"), Some(12.5)),
            (serde_json::json!("n/a"), None),
            (serde_json::json!(null), None),
            (serde_json::json!({"pct": 1}), None),
        ];
        for (progress, expected) in cases {
            let json = serde_json::json!({ "status": "EXECUTE", "progress": progress });
            let info: SearchInfo = serde_json::from_value(json).unwrap();
            assert_eq!(info.status, SearchStatus::Execute);
            assert_eq!(info.progress, expected);
        }

        let info: SearchInfo =
            serde_json::from_value(serde_json::json!({ "status": "WAIT" })).unwrap();
        assert_eq!(info.progress, None);
    }

    #[test]
    fn test_search_info_requires_status() {
        let json = serde_json::json!({ "search_id": "abc", "progress": 0 });
        assert!(serde_json::from_value::<SearchInfo>(json).is_err());
    }
}
