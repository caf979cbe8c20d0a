//! In-memory driver for testing
//!
//! Records every prepared execution with its bound values, serves queued
//! results, and counts connections so tests can check that nothing leaks.

use crate::core::{
    database::{Driver, DriverConnection},
    error::{ConnectorError, Result},
    parameter::BoundValue,
    result::QueryResult,
    settings::ConnectionSettings,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Whether a recorded statement ran as an update or a select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionKind {
    /// Ran through `DriverConnection::execute`
    Update,
    /// Ran through `DriverConnection::select`
    Select,
}

/// A recorded statement execution
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedExecution {
    pub kind: ExecutionKind,
    pub sql: String,
    pub params: Vec<BoundValue>,
}

#[derive(Debug, Default)]
struct DriverState {
    responses: VecDeque<QueryResult>,
    executions: Vec<RecordedExecution>,
    affected_rows: u64,
    connects: usize,
    closes: usize,
    open: usize,
    last_settings: Option<ConnectionSettings>,
    connect_error: Option<String>,
    execute_error: Option<String>,
    close_error: Option<String>,
}

/// A scripted driver that never touches a real database
///
/// Clones share state, so a test can keep a handle while a connector owns
/// the driver.
///
/// # Example
/// ```
/// use rust_database_connector::backends::InMemoryDriver;
/// use rust_database_connector::prelude::*;
///
/// let driver = InMemoryDriver::new().with_affected_rows(1);
/// let mut connector = Connector::with_driver(
///     driver.clone(),
///     ConnectionSettings::new("memory:", "", ""),
/// );
///
/// let mut query = Query::with_template("delete from t where id = ?");
/// query.add_int(3);
/// assert_eq!(connector.execute_update(&query).unwrap(), 1);
///
/// driver.assert_execution_count(1);
/// assert_eq!(driver.open_connections(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDriver {
    state: Arc<Mutex<DriverState>>,
}

impl InMemoryDriver {
    /// Create a driver with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next select. Results are served in FIFO
    /// order; an empty result is returned once the queue is drained.
    pub fn with_response(self, response: QueryResult) -> Self {
        self.state.lock().responses.push_back(response);
        self
    }

    /// Row count reported by every update
    pub fn with_affected_rows(self, rows: u64) -> Self {
        self.state.lock().affected_rows = rows;
        self
    }

    /// Make every connect attempt fail with `message`
    pub fn failing_connect(self, message: impl Into<String>) -> Self {
        self.state.lock().connect_error = Some(message.into());
        self
    }

    /// Make every execution fail with `message` (after it is recorded)
    pub fn failing_execute(self, message: impl Into<String>) -> Self {
        self.state.lock().execute_error = Some(message.into());
        self
    }

    /// Make every close fail with `message`. The connection is still released.
    pub fn failing_close(self, message: impl Into<String>) -> Self {
        self.state.lock().close_error = Some(message.into());
        self
    }

    /// All executions recorded so far
    pub fn executions(&self) -> Vec<RecordedExecution> {
        self.state.lock().executions.clone()
    }

    /// The most recent execution, if any
    pub fn last_execution(&self) -> Option<RecordedExecution> {
        self.state.lock().executions.last().cloned()
    }

    /// Number of successful connects
    pub fn connect_count(&self) -> usize {
        self.state.lock().connects
    }

    /// Number of explicit closes
    pub fn close_count(&self) -> usize {
        self.state.lock().closes
    }

    /// Connections handed out and not yet released
    pub fn open_connections(&self) -> usize {
        self.state.lock().open
    }

    /// Settings passed to the most recent connect attempt
    pub fn last_settings(&self) -> Option<ConnectionSettings> {
        self.state.lock().last_settings.clone()
    }

    /// Assert that exactly `expected` statements were executed
    pub fn assert_execution_count(&self, expected: usize) {
        let actual = self.state.lock().executions.len();
        assert_eq!(
            actual, expected,
            "Execution count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }

    /// Assert the last execution matches kind, SQL and bound values
    pub fn assert_last_execution(
        &self,
        kind: ExecutionKind,
        expected_sql: &str,
        expected_params: &[BoundValue],
    ) {
        let last = self.last_execution().expect("No executions were recorded");
        assert_eq!(last.kind, kind, "Execution kind mismatch");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
        assert_eq!(
            last.params, expected_params,
            "Parameters mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_params, last.params
        );
    }
}

impl Driver for InMemoryDriver {
    type Connection = InMemoryConnection;

    fn connect(&self, settings: &ConnectionSettings) -> Result<InMemoryConnection> {
        let mut state = self.state.lock();
        state.last_settings = Some(settings.clone());
        if let Some(message) = &state.connect_error {
            return Err(ConnectorError::connection(message.clone()));
        }
        state.connects += 1;
        state.open += 1;

        Ok(InMemoryConnection {
            state: Arc::clone(&self.state),
            released: false,
        })
    }
}

/// Connection handed out by [`InMemoryDriver`]
#[derive(Debug)]
pub struct InMemoryConnection {
    state: Arc<Mutex<DriverState>>,
    released: bool,
}

impl InMemoryConnection {
    fn record(&self, kind: ExecutionKind, sql: &str, params: &[BoundValue]) -> Result<()> {
        let mut state = self.state.lock();
        state.executions.push(RecordedExecution {
            kind,
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        match &state.execute_error {
            Some(message) => Err(ConnectorError::connection(message.clone())),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.state.lock().open -= 1;
        }
    }
}

impl DriverConnection for InMemoryConnection {
    fn is_closed(&self) -> bool {
        self.released
    }

    fn execute(&mut self, sql: &str, params: &[BoundValue]) -> Result<u64> {
        self.record(ExecutionKind::Update, sql, params)?;
        Ok(self.state.lock().affected_rows)
    }

    fn select(&mut self, sql: &str, params: &[BoundValue]) -> Result<QueryResult> {
        self.record(ExecutionKind::Select, sql, params)?;
        Ok(self.state.lock().responses.pop_front().unwrap_or_default())
    }

    fn close(mut self) -> Result<()> {
        self.release();
        let mut state = self.state.lock();
        state.closes += 1;
        match &state.close_error {
            Some(message) => Err(ConnectorError::connection(message.clone())),
            None => Ok(()),
        }
    }
}

impl Drop for InMemoryConnection {
    fn drop(&mut self) {
        self.release();
    }
}
