//! Driver traits
//!
//! This module defines the seam between [`Connector`](super::connector::Connector)
//! and a concrete database client. A [`Driver`] opens connections; a
//! [`DriverConnection`] prepares one statement per call, binds parameters at
//! 1-based positions, executes it and releases the statement (and cursor)
//! before returning.

use super::error::Result;
use super::parameter::BoundValue;
use super::result::QueryResult;
use super::settings::ConnectionSettings;

/// Factory for database connections
pub trait Driver {
    /// Connection type handed out by this driver
    type Connection: DriverConnection;

    /// Open a new connection with the given credentials
    ///
    /// # Errors
    ///
    /// Returns a connection error on invalid credentials or an unreachable
    /// database.
    fn connect(&self, settings: &ConnectionSettings) -> Result<Self::Connection>;
}

/// A live connection owned by exactly one caller
pub trait DriverConnection {
    /// Check if the underlying handle has been closed
    fn is_closed(&self) -> bool;

    /// Prepare `sql`, bind `params` in order and run it as an update
    /// (INSERT, UPDATE, DELETE, DDL). Returns the affected row count.
    ///
    /// The statement is released before this returns, on success or failure.
    fn execute(&mut self, sql: &str, params: &[BoundValue]) -> Result<u64>;

    /// Prepare `sql`, bind `params` in order and collect every returned row
    ///
    /// Column names are read once from the statement metadata and every
    /// value is stringified. Cursor and statement are released before this
    /// returns, on success or failure.
    fn select(&mut self, sql: &str, params: &[BoundValue]) -> Result<QueryResult>;

    /// Close the connection
    ///
    /// # Errors
    ///
    /// Returns the client's error if closing failed; the handle is released
    /// either way.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}
