//! Query result model
//!
//! Rows and columns keep the order the database returned them in. Every value
//! is stored as text; SQL NULL is kept apart as `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of a result set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseColumn {
    name: String,
    value: Option<String>,
}

impl DatabaseColumn {
    /// Create a new column
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Column name as reported by the database
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stringified value, `None` for SQL NULL
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

impl fmt::Display for DatabaseColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} : {}", self.name, value),
            None => write!(f, "{} : null", self.name),
        }
    }
}

/// One row of a result set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRow {
    columns: Vec<DatabaseColumn>,
}

impl DatabaseRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `capacity` columns
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a column
    pub fn add_column(&mut self, column: DatabaseColumn) {
        self.columns.push(column);
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column at the 0-based `index`
    pub fn get_column(&self, index: usize) -> Option<&DatabaseColumn> {
        self.columns.get(index)
    }

    /// First column with the given name
    pub fn get(&self, name: &str) -> Option<&DatabaseColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Columns in database order
    pub fn columns(&self) -> &[DatabaseColumn] {
        &self.columns
    }

    /// Iterate over the columns
    pub fn iter(&self) -> std::slice::Iter<'_, DatabaseColumn> {
        self.columns.iter()
    }

    /// Returns true if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<DatabaseColumn> for DatabaseRow {
    fn from_iter<I: IntoIterator<Item = DatabaseColumn>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DatabaseRow {
    type Item = &'a DatabaseColumn;
    type IntoIter = std::slice::Iter<'a, DatabaseColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// All rows returned by a select
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    rows: Vec<DatabaseRow>,
}

impl QueryResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn add_row(&mut self, row: DatabaseRow) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row at the 0-based `index`
    pub fn get_row(&self, index: usize) -> Option<&DatabaseRow> {
        self.rows.get(index)
    }

    /// Rows in database order
    pub fn rows(&self) -> &[DatabaseRow] {
        &self.rows
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, DatabaseRow> {
        self.rows.iter()
    }

    /// Returns true if the select matched no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<DatabaseRow> for QueryResult {
    fn from_iter<I: IntoIterator<Item = DatabaseRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for QueryResult {
    type Item = DatabaseRow;
    type IntoIter = std::vec::IntoIter<DatabaseRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a DatabaseRow;
    type IntoIter = std::slice::Iter<'a, DatabaseRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
