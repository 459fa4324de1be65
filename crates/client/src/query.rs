//! AQL query composition.
//!
//! Responsibilities:
//! - Append optional `LIMIT`, `START ... STOP ...` and `PARAMETERS PRIORITY` clauses
//!   to a caller-supplied base query.
//!
//! Does NOT handle:
//! - Parsing, escaping or validating AQL. The base text is passed through as-is.
//!
//! Invariants:
//! - Clause order is always limit, time window, priority.
//! - Each clause is appended on its own line as `"\n <clause>"`.
//! - An end time without a start time produces no time clause.
//! - A zero limit produces no limit clause.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Ariel search priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    /// Parse a priority, returning `None` for anything outside LOW, NORMAL, HIGH.
    ///
    /// Matching is exact. Callers holding untrusted strings use this to drop
    /// unknown priorities instead of failing the search.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "NORMAL" => Ok(Self::Normal),
            "HIGH" => Ok(Self::High),
            other => Err(format!(
                "invalid priority '{other}', expected LOW, NORMAL or HIGH"
            )),
        }
    }
}

/// A base query plus the optional modifiers applied at submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AqlQuery {
    pub text: String,
    pub limit: Option<u64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
}

impl AqlQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Cap the number of rows. Zero means no limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restrict the search to `[start, now]`.
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end of the time window. Ignored unless a start is also set.
    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the priority from a string, dropping unrecognized values.
    pub fn priority_lenient(mut self, priority: &str) -> Self {
        self.priority = Priority::parse_lenient(priority);
        self
    }

    /// Final query text using the current wall clock for an open-ended window.
    pub fn compose(&self) -> String {
        self.compose_at(Utc::now())
    }

    /// Final query text, using `now` as the window end when no end is set.
    pub fn compose_at(&self, now: DateTime<Utc>) -> String {
        compose(
            &self.text,
            self.limit,
            self.start,
            self.end,
            self.priority,
            now,
        )
    }
}

impl From<&str> for AqlQuery {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AqlQuery {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Append the requested clauses to `base`.
pub fn compose(
    base: &str,
    limit: Option<u64>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    priority: Option<Priority>,
    now: DateTime<Utc>,
) -> String {
    let mut query = base.to_string();

    if let Some(limit) = limit.filter(|&n| n > 0) {
        query.push_str(&format!("\n LIMIT {limit}"));
    }

    if let Some(start) = start {
        let stop = end.unwrap_or(now);
        query.push_str(&format!(
            "\n START {} STOP {}",
            start.timestamp_millis(),
            stop.timestamp_millis()
        ));
    }

    if let Some(priority) = priority {
        query.push_str(&format!("\n PARAMETERS PRIORITY='{priority}'"));
    }

    query
}
