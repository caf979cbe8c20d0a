//! Error types for the connector
//!
//! This module defines all error types that can occur while building, binding
//! and executing queries.

use super::parameter::ParameterType;

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Error types for connector operations
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// The query cannot be executed (empty template, unknown parameter type)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Connection, execution or release failure reported by a driver
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A numeric parameter value could not be parsed as its declared type
    #[error("Format error: parameter {position} is not a valid {expected}: {value:?}")]
    FormatError {
        position: usize,
        expected: ParameterType,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Settings file content is malformed
    #[error("Settings error: {0}")]
    Settings(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
}

impl ConnectorError {
    /// Create a new invalid query error
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        ConnectorError::InvalidQuery(msg.into())
    }

    /// Create a new connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        ConnectorError::ConnectionError(msg.into())
    }

    /// Create a format error for the 1-based parameter `position`
    pub fn format(
        position: usize,
        expected: ParameterType,
        value: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::FormatError {
            position,
            expected,
            value: value.into(),
            source: Box::new(source),
        }
    }

    /// Create a new settings error
    pub fn settings<S: Into<String>>(msg: S) -> Self {
        ConnectorError::Settings(msg.into())
    }

    /// True for errors raised before any database interaction because the
    /// query itself is unusable
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, ConnectorError::InvalidQuery(_))
    }

    /// True for errors reported by the database client
    pub fn is_connection(&self) -> bool {
        match self {
            ConnectorError::ConnectionError(_) => true,
            #[cfg(feature = "sqlite")]
            ConnectorError::SqliteError(_) => true,
            _ => false,
        }
    }

    /// True for numeric parameter parse failures
    pub fn is_format(&self) -> bool {
        matches!(self, ConnectorError::FormatError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ConnectorError::invalid_query("empty template");
        assert!(matches!(err, ConnectorError::InvalidQuery(_)));
        assert!(err.is_invalid_query());

        let err = ConnectorError::connection("Connection refused");
        assert!(err.is_connection());
        assert!(!err.is_format());

        let parse_err = "abc".parse::<i32>().unwrap_err();
        let err = ConnectorError::format(2, ParameterType::Int, "abc", parse_err);
        assert!(err.is_format());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display() {
        let err = ConnectorError::connection("Connection refused");
        assert_eq!(err.to_string(), "Connection error: Connection refused");

        let parse_err = "1.5x".parse::<f64>().unwrap_err();
        let err = ConnectorError::format(1, ParameterType::Double, "1.5x", parse_err);
        assert_eq!(
            err.to_string(),
            "Format error: parameter 1 is not a valid double: \"1.5x\""
        );

        let err = ConnectorError::settings("missing url line");
        assert_eq!(err.to_string(), "Settings error: missing url line");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ConnectorError = io.into();
        assert!(matches!(err, ConnectorError::IoError(_)));
        assert!(!err.is_connection());
    }
}
