//! Core connector types and traits
//!
//! This module provides the fundamental building blocks: queries and their
//! parameters, the result model, connection settings, the driver traits and
//! the connector that ties them together.

pub mod connector;
pub mod database;
pub mod database_types;
pub mod error;
pub mod parameter;
pub mod query;
pub mod result;
pub mod settings;

// Re-export commonly used types
pub use connector::Connector;
#[cfg(feature = "sqlite")]
pub use connector::SqliteConnector;
pub use database::{Driver, DriverConnection};
pub use database_types::DatabaseType;
pub use error::{ConnectorError, Result};
pub use parameter::{BoundValue, Parameter, ParameterType};
pub use query::Query;
pub use result::{DatabaseColumn, DatabaseRow, QueryResult};
pub use settings::ConnectionSettings;
