//! Connection-per-operation query execution
//!
//! A [`Connector`] opens a connection when an operation needs one and closes it
//! again before the operation returns, whatever the outcome. Statement and
//! cursor never outlive the driver call that created them.

use super::database::{Driver, DriverConnection};
use super::error::Result;
use super::parameter::BoundValue;
use super::query::Query;
use super::result::QueryResult;
use super::settings::ConnectionSettings;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

#[cfg(feature = "sqlite")]
use crate::backends::sqlite::SqliteDriver;

/// Executes [`Query`] values through a [`Driver`]
///
/// Operations take `&mut self`: a connector serves one caller at a time. Use
/// one connector per thread, or serialize access externally.
///
/// # Example
///
/// ```no_run
/// use rust_database_connector::prelude::*;
///
/// fn main() -> Result<()> {
///     let mut connector = SqliteConnector::new("sqlite:app.db", "", "");
///
///     let mut query = Query::with_template("select * from users where id = ? and name = ?");
///     query.add_int(120).add_text("testName");
///
///     let result = connector.execute_select(&query)?;
///     for row in &result {
///         for column in row {
///             println!("{}", column);
///         }
///     }
///     assert!(!connector.is_connected());
///     Ok(())
/// }
/// ```
pub struct Connector<D: Driver> {
    driver: D,
    settings: ConnectionSettings,
    connection: Option<D::Connection>,
}

/// Connector backed by the bundled SQLite driver
#[cfg(feature = "sqlite")]
pub type SqliteConnector = Connector<SqliteDriver>;

#[cfg(feature = "sqlite")]
impl Connector<SqliteDriver> {
    /// Create a SQLite connector from explicit credentials
    ///
    /// User and password are stored but SQLite ignores them.
    pub fn new<U, N, P>(url: U, user: N, password: P) -> Self
    where
        U: Into<String>,
        N: Into<String>,
        P: Into<String>,
    {
        Self::with_driver(
            SqliteDriver::new(),
            ConnectionSettings::new(url, user, password),
        )
    }

    /// Create a SQLite connector from a three-line settings file
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a settings error
    /// if it has no URL line.
    pub fn from_settings_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = ConnectionSettings::from_file(path)?;
        Ok(Self::with_driver(SqliteDriver::new(), settings))
    }
}

impl<D: Driver> Connector<D> {
    /// Create a connector for any driver
    pub fn with_driver(driver: D, settings: ConnectionSettings) -> Self {
        Self {
            driver,
            settings,
            connection: None,
        }
    }

    /// Credentials used for new connections
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// The driver connections are opened through
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Replace the credentials with those read from a settings file
    ///
    /// A connection that is already open keeps its old credentials until it
    /// is closed.
    pub fn load_settings_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.settings = ConnectionSettings::from_file(path)?;
        Ok(())
    }

    /// Open a connection with the stored credentials
    ///
    /// A connection that is already open is closed first.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the database rejects the credentials or
    /// cannot be reached.
    pub fn open_connection(&mut self) -> Result<()> {
        if let Some(previous) = self.connection.take() {
            release(previous)?;
        }
        debug!(url = %self.settings.url(), "Opening connection");
        self.connection = Some(self.driver.connect(&self.settings)?);
        Ok(())
    }

    /// Close the connection if there is one
    pub fn close_connection(&mut self) -> Result<()> {
        match self.connection.take() {
            Some(connection) => release(connection),
            None => Ok(()),
        }
    }

    /// Check if a connection exists and is not closed
    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|connection| !connection.is_closed())
    }

    /// Run an INSERT, UPDATE, DELETE or DDL statement
    ///
    /// Returns the number of affected rows. The connection is closed before
    /// this returns.
    ///
    /// # Errors
    ///
    /// - [`InvalidQuery`](super::ConnectorError::InvalidQuery) if the template
    ///   is empty; no connection is opened.
    /// - [`FormatError`](super::ConnectorError::FormatError) if a numeric
    ///   parameter does not parse; no connection is opened.
    /// - Driver errors from connecting, preparing, executing or closing.
    pub fn execute_update(&mut self, query: &Query) -> Result<u64> {
        let params = self.prepare(query)?;
        let sql = query.to_string();
        debug!(sql = %sql, parameters = params.len(), "Executing update");

        self.with_connection(|connection| connection.execute(&sql, &params))
    }

    /// Run a SELECT statement and collect every row
    ///
    /// A select that matches nothing returns an empty [`QueryResult`]. The
    /// connection is closed before this returns.
    ///
    /// # Errors
    ///
    /// Same as [`execute_update`](Self::execute_update).
    pub fn execute_select(&mut self, query: &Query) -> Result<QueryResult> {
        let params = self.prepare(query)?;
        let sql = query.to_string();
        debug!(sql = %sql, parameters = params.len(), "Executing select");

        let result = self.with_connection(|connection| connection.select(&sql, &params))?;
        debug!(rows = result.row_count(), "Select finished");
        Ok(result)
    }

    /// Validate `query` and parse its parameters
    ///
    /// A rejected query never opens a connection; one left open by
    /// [`open_connection`](Self::open_connection) is closed all the same.
    fn prepare(&mut self, query: &Query) -> Result<Vec<BoundValue>> {
        query.bind_values().inspect_err(|_| {
            if let Err(close_err) = self.close_connection() {
                warn!(error = %close_err, "Failed to close connection after rejected query");
            }
        })
    }

    /// Run `op` on the live connection (opening one if needed), then close it
    fn with_connection<T>(
        &mut self,
        op: impl FnOnce(&mut D::Connection) -> Result<T>,
    ) -> Result<T> {
        let mut connection = match self.connection.take() {
            Some(connection) if !connection.is_closed() => connection,
            _ => {
                debug!(url = %self.settings.url(), "Opening connection");
                self.driver.connect(&self.settings)?
            }
        };

        let outcome = op(&mut connection);
        let released = release(connection);

        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!(error = %close_err, "Failed to close connection after failed operation");
                Err(e)
            }
        }
    }
}

fn release<C: DriverConnection>(connection: C) -> Result<()> {
    debug!("Closing connection");
    connection.close()
}

impl<D: Driver> fmt::Debug for Connector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("settings", &self.settings)
            .field("connected", &self.is_connected())
            .finish()
    }
}
