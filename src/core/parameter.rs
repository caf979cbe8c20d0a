//! Query parameter types
//!
//! Parameters are stored the way callers hand them over: a declared SQL type
//! plus a string-encoded value. They are parsed into a [`BoundValue`] right
//! before execution, so a malformed number never reaches the database.

use super::error::{ConnectorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL bind type of a query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Bound verbatim as a string
    Text,
    /// 32-bit signed integer
    Int,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
}

impl ParameterType {
    /// Convert parameter type to string representation
    pub fn to_str(&self) -> &'static str {
        match self {
            ParameterType::Text => "text",
            ParameterType::Int => "int",
            ParameterType::Float => "float",
            ParameterType::Double => "double",
        }
    }

    /// Check if values of this type are parsed as numbers before binding
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ParameterType::Text)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for ParameterType {
    type Err = ConnectorError;

    /// Parse a type tag. Accepts the short names as well as the
    /// `intNumber`/`floatNumber`/`doubleNumber` spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ParameterType::Text),
            "int" | "intnumber" => Ok(ParameterType::Int),
            "float" | "floatnumber" => Ok(ParameterType::Float),
            "double" | "doublenumber" => Ok(ParameterType::Double),
            _ => Err(ConnectorError::invalid_query(format!(
                "invalid parameter type: {}",
                s
            ))),
        }
    }
}

/// A typed query parameter with its string-encoded value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    kind: ParameterType,
    value: String,
}

impl Parameter {
    /// Create a new parameter
    pub fn new(value: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Declared bind type
    pub fn kind(&self) -> ParameterType {
        self.kind
    }

    /// Raw string-encoded value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parse the value as its declared type.
    ///
    /// `position` is the 1-based bind position, reported in the error.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::FormatError`] if a numeric value does not parse.
    pub fn bind_value(&self, position: usize) -> Result<BoundValue> {
        let value = self.value.as_str();
        match self.kind {
            ParameterType::Text => Ok(BoundValue::Text(self.value.clone())),
            ParameterType::Int => value
                .parse()
                .map(BoundValue::Int)
                .map_err(|e| ConnectorError::format(position, self.kind, value, e)),
            ParameterType::Float => value
                .parse()
                .map(BoundValue::Float)
                .map_err(|e| ConnectorError::format(position, self.kind, value, e)),
            ParameterType::Double => value
                .parse()
                .map(BoundValue::Double)
                .map_err(|e| ConnectorError::format(position, self.kind, value, e)),
        }
    }
}

/// A parameter value after parsing, ready to be bound to a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundValue {
    /// String value
    Text(String),
    /// 32-bit integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
}

impl BoundValue {
    /// Get the bind type of this value
    pub fn kind(&self) -> ParameterType {
        match self {
            BoundValue::Text(_) => ParameterType::Text,
            BoundValue::Int(_) => ParameterType::Int,
            BoundValue::Float(_) => ParameterType::Float,
            BoundValue::Double(_) => ParameterType::Double,
        }
    }
}

impl From<&str> for BoundValue {
    fn from(v: &str) -> Self {
        BoundValue::Text(v.to_string())
    }
}

impl From<String> for BoundValue {
    fn from(v: String) -> Self {
        BoundValue::Text(v)
    }
}

impl From<i32> for BoundValue {
    fn from(v: i32) -> Self {
        BoundValue::Int(v)
    }
}

impl From<f32> for BoundValue {
    fn from(v: f32) -> Self {
        BoundValue::Float(v)
    }
}

impl From<f64> for BoundValue {
    fn from(v: f64) -> Self {
        BoundValue::Double(v)
    }
}
