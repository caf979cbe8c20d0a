//! # Rust Database Connector
//!
//! A lightweight adapter for running parameterized SQL without building SQL
//! strings by hand. Every operation opens a connection, prepares one
//! statement, binds typed parameters at 1-based positions, executes, copies
//! the result set into plain row/column values and releases everything again
//! before returning.
//!
//! ## Features
//!
//! - **Typed parameters**: text, int, float and double, validated before any
//!   connection is opened
//! - **Simple results**: rows of named, stringified columns in database order
//! - **No leaks**: cursor, statement and connection are released on every
//!   exit path
//! - **Pluggable drivers**: SQLite out of the box, an in-memory recording
//!   driver for tests
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! rust_database_connector = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! ### Basic Usage
//!
//! ```rust,no_run
//! use rust_database_connector::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut connector = SqliteConnector::new("sqlite:app.db", "", "");
//!
//!     connector.execute_update(&Query::with_template(
//!         "CREATE TABLE IF NOT EXISTS users (id INTEGER, name TEXT)",
//!     ))?;
//!
//!     let mut insert = Query::with_template("INSERT INTO users VALUES (?, ?)");
//!     insert.add_int(120).add_text("testName");
//!     connector.execute_update(&insert)?;
//!
//!     let mut select = Query::with_template("SELECT * FROM users WHERE id = ?");
//!     select.add_int(120);
//!     let result = connector.execute_select(&select)?;
//!
//!     for row in &result {
//!         if let Some(name) = row.get("name").and_then(DatabaseColumn::value) {
//!             println!("User: {}", name);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Settings File
//!
//! A connector can read its credentials from a three-line file holding the
//! connection URL, the user name and the password:
//!
//! ```text
//! jdbc:sqlite:/var/lib/app/data.db
//! UserName
//! Password
//! ```
//!
//! ```rust,no_run
//! use rust_database_connector::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let connector = SqliteConnector::from_settings_file("db.settings")?;
//!     println!("{:?}", connector.settings());
//!     Ok(())
//! }
//! ```
//!
//! ## Project Structure
//!
//! ```text
//! rust_database_connector/
//! ├── src/
//! │   ├── core/              # Core types and traits
//! │   │   ├── connector.rs   # Connection-per-operation executor
//! │   │   ├── database.rs    # Driver traits
//! │   │   ├── database_types.rs  # Database family from URL
//! │   │   ├── error.rs       # Error types
//! │   │   ├── parameter.rs   # Typed parameters
//! │   │   ├── query.rs       # SQL template + parameters
//! │   │   ├── result.rs      # Result/row/column model
//! │   │   ├── settings.rs    # Credentials and settings file
//! │   │   └── mod.rs
//! │   ├── backends/          # Driver implementations
//! │   │   ├── in_memory.rs   # Recording test driver
//! │   │   ├── sqlite.rs      # SQLite driver
//! │   │   └── mod.rs
//! │   └── lib.rs
//! ├── demos/                 # Example programs
//! ├── tests/                 # Integration tests
//! ├── Cargo.toml
//! └── DESIGN.md
//! ```

/// Core connector types and traits
pub mod core;

/// Driver implementations
pub mod backends;

/// Prelude for convenient imports
///
/// ```rust
/// use rust_database_connector::prelude::*;
///
/// let mut query = Query::with_template("select ?");
/// query.add_int(1);
/// assert!(query.is_valid());
/// ```
pub mod prelude {
    pub use crate::core::{
        ConnectionSettings, Connector, ConnectorError, DatabaseColumn, DatabaseRow, DatabaseType,
        Driver, DriverConnection, ParameterType, Query, QueryResult, Result,
    };

    #[cfg(feature = "sqlite")]
    pub use crate::core::SqliteConnector;
}

// Re-export at root level for convenience
pub use crate::core::{
    BoundValue, ConnectionSettings, Connector, ConnectorError, DatabaseColumn, DatabaseRow,
    DatabaseType, Driver, DriverConnection, Parameter, ParameterType, Query, QueryResult, Result,
};

#[cfg(feature = "sqlite")]
pub use crate::backends::SqliteDriver;
#[cfg(feature = "sqlite")]
pub use crate::core::SqliteConnector;
