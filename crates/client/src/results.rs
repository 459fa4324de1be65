//! Results envelope unwrapping.
//!
//! The results endpoint wraps the row list in a single named key whose name
//! depends on the query (`events`, `flows`, `cursor`, ...). This module checks
//! that shape and returns the rows.
//!
//! Invariants:
//! - The envelope is a JSON object with exactly one key.
//! - That key's value is an array whose elements are all JSON objects.
//! - Row order is preserved exactly as returned.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::models::Row;
use crate::table::ResultTable;

/// Rows of a completed search and the envelope key they arrived under.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub envelope_key: String,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Column-aligned view of the rows.
    pub fn to_table(&self) -> ResultTable {
        ResultTable::from_rows(&self.rows)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Unwrap a results envelope into its rows.
///
/// # Errors
///
/// Returns [`ClientError::MalformedResponse`] when the envelope is not an
/// object, has zero or several keys, or its single value is not an array of
/// objects.
pub fn materialize(envelope: Value) -> Result<ResultSet> {
    let Value::Object(map) = envelope else {
        return Err(ClientError::MalformedResponse(format!(
            "results envelope must be an object, got {}",
            kind(&envelope)
        )));
    };

    if map.len() != 1 {
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        return Err(ClientError::MalformedResponse(format!(
            "results envelope must have exactly one key, got {} ({})",
            map.len(),
            keys.join(", ")
        )));
    }

    let Some((envelope_key, value)) = map.into_iter().next() else {
        return Err(ClientError::MalformedResponse(
            "results envelope is empty".to_string(),
        ));
    };

    let Value::Array(items) = value else {
        return Err(ClientError::MalformedResponse(format!(
            "results envelope key '{envelope_key}' must hold an array, got {}",
            kind(&value)
        )));
    };

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(ClientError::MalformedResponse(format!(
                "row {index} under '{envelope_key}' must be an object, got {}",
                kind(&other)
            ))),
        })
        .collect::<Result<Vec<Row>>>()?;

    Ok(ResultSet { envelope_key, rows })
}
