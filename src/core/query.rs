//! Parameterized SQL queries
//!
//! A [`Query`] is an SQL template with `?` placeholders plus the ordered list of
//! parameters to bind into them. No SQL parsing happens here: the template is
//! handed to the database as-is and a placeholder/parameter count mismatch is
//! reported by the database.

use super::error::{ConnectorError, Result};
use super::parameter::{BoundValue, Parameter, ParameterType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL template plus ordered, typed parameters
///
/// # Example
///
/// ```
/// use rust_database_connector::Query;
///
/// let mut query = Query::with_template("select * from t where id = ? and name = ?");
/// query.add_int(120).add_text("testName");
///
/// assert!(query.is_valid());
/// assert_eq!(query.parameter_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    template: Option<String>,
    parameters: Vec<Parameter>,
}

impl Query {
    /// Create an empty query with no template
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a query with the given template
    pub fn with_template(sql: impl Into<String>) -> Self {
        Self {
            template: Some(sql.into()),
            parameters: Vec::new(),
        }
    }

    /// Store the SQL text, replacing any previous template
    pub fn set_template(&mut self, sql: impl Into<String>) -> &mut Self {
        self.template = Some(sql.into());
        self
    }

    /// The stored template, if any
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Append a parameter with a string-encoded value and declared type
    pub fn add_parameter(&mut self, value: impl Into<String>, kind: ParameterType) -> &mut Self {
        self.parameters.push(Parameter::new(value, kind));
        self
    }

    /// Append a parameter whose type is given as a textual tag
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidQuery`] for an unknown tag; the query
    /// is left unchanged.
    pub fn add_tagged_parameter(
        &mut self,
        value: impl Into<String>,
        tag: &str,
    ) -> Result<&mut Self> {
        let kind = tag.parse::<ParameterType>()?;
        Ok(self.add_parameter(value, kind))
    }

    /// Append a text parameter
    pub fn add_text(&mut self, value: impl Into<String>) -> &mut Self {
        self.add_parameter(value, ParameterType::Text)
    }

    /// Append an integer parameter
    pub fn add_int(&mut self, value: i32) -> &mut Self {
        self.add_parameter(value.to_string(), ParameterType::Int)
    }

    /// Append a single precision parameter
    pub fn add_float(&mut self, value: f32) -> &mut Self {
        self.add_parameter(value.to_string(), ParameterType::Float)
    }

    /// Append a double precision parameter
    pub fn add_double(&mut self, value: f64) -> &mut Self {
        self.add_parameter(value.to_string(), ParameterType::Double)
    }

    /// Parameters in bind order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of parameters added so far
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// True iff a non-empty template is stored. Parameters are not checked.
    pub fn is_valid(&self) -> bool {
        self.template.as_deref().is_some_and(|sql| !sql.is_empty())
    }

    /// Check the query can be sent to the database
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidQuery`] if the template is missing or empty.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ConnectorError::invalid_query("query template is empty"))
        }
    }

    /// Validate the query and parse every parameter in bind order
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidQuery`] for an invalid template and
    /// [`ConnectorError::FormatError`] for the first parameter that fails to
    /// parse as its declared type.
    pub fn bind_values(&self) -> Result<Vec<BoundValue>> {
        self.validate()?;
        self.parameters
            .iter()
            .enumerate()
            .map(|(i, param)| param.bind_value(i + 1))
            .collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template.as_deref().unwrap_or(""))
    }
}
