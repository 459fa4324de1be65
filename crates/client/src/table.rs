//! Column-aligned view of search results.
//!
//! Responsibilities:
//! - Build a table from rows: columns are the union of all row keys in
//!   first-seen order, missing fields are null.
//! - Render the table as CSV.
//!
//! Invariants:
//! - Every table row has exactly `columns.len()` cells.

use std::collections::HashMap;
use std::io;

use serde::Serialize;
use serde_json::Value;

use crate::models::Row;

/// Search results arranged as named columns and positional cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Build a table from rows. Never fails.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            for key in row.keys() {
                if !index.contains_key(key.as_str()) {
                    index.insert(key.as_str(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let cells = rows
            .iter()
            .map(|row| {
                let mut cells = vec![Value::Null; columns.len()];
                for (key, value) in row {
                    if let Some(&i) = index.get(key.as_str()) {
                        cells[i] = value.clone();
                    }
                }
                cells
            })
            .collect();

        Self {
            columns,
            rows: cells,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of `column`, top to bottom.
    pub fn column(&self, column: &str) -> Option<impl Iterator<Item = &Value>> {
        let i = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(move |row| &row[i]))
    }

    /// Write the table as CSV with a header row.
    ///
    /// Nothing is written for a table without columns.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        if self.columns.is_empty() {
            return Ok(());
        }

        let mut w = csv::Writer::from_writer(writer);
        w.write_record(&self.columns)?;
        for row in &self.rows {
            w.write_record(row.iter().map(cell_text))?;
        }
        w.flush()?;
        Ok(())
    }

    /// Render the table as a CSV string.
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Text form of a cell: strings unquoted, null empty, everything else as JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
