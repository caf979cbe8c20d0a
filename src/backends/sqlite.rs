//! SQLite driver implementation
//!
//! This module provides a SQLite implementation of the [`Driver`] trait on top
//! of `rusqlite`. User name and password are not used by SQLite.

use crate::core::{
    database::{Driver, DriverConnection},
    database_types::DatabaseType,
    error::{ConnectorError, Result},
    parameter::BoundValue,
    result::{DatabaseColumn, DatabaseRow, QueryResult},
    settings::ConnectionSettings,
};
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, OpenFlags, Statement, ToSql};
use tracing::debug;

impl ToSql for BoundValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            BoundValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            BoundValue::Int(v) => ToSqlOutput::Owned(Value::Integer(i64::from(*v))),
            BoundValue::Float(v) => ToSqlOutput::Owned(Value::Real(widen_float(*v))),
            BoundValue::Double(v) => ToSqlOutput::Owned(Value::Real(*v)),
        })
    }
}

/// Widen an `f32` through its shortest decimal form so `0.1f32` is stored
/// as `0.1` rather than `0.10000000149011612`.
fn widen_float(v: f32) -> f64 {
    v.to_string().parse().unwrap_or_else(|_| f64::from(v))
}

/// SQLite driver
///
/// Accepted URLs: `jdbc:sqlite:PATH`, `sqlite://PATH`, `sqlite:PATH`,
/// `:memory:` and bare file paths. Every connection is a fresh handle, so an
/// in-memory database does not survive between operations of a
/// [`Connector`](crate::Connector).
#[derive(Debug, Clone)]
pub struct SqliteDriver {
    flags: OpenFlags,
    foreign_keys: bool,
}

impl SqliteDriver {
    /// Create a driver that opens read-write and creates missing files
    pub fn new() -> Self {
        Self {
            flags: OpenFlags::default(),
            foreign_keys: true,
        }
    }

    /// Use custom open flags
    pub fn with_flags(mut self, flags: OpenFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Open databases read-only; missing files are an error
    pub fn read_only(self) -> Self {
        self.with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI)
    }

    /// Toggle `PRAGMA foreign_keys` on new connections (on by default)
    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Extract the database path from a connection URL
    fn database_path(url: &str) -> Result<&str> {
        let trimmed = url.strip_prefix("jdbc:").unwrap_or(url);
        let path = match trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
        {
            Some(path) => path,
            None => match DatabaseType::from_url(url) {
                DatabaseType::None => url,
                other => {
                    return Err(ConnectorError::connection(format!(
                        "SQLite driver cannot open a {} url: {}",
                        other, url
                    )))
                }
            },
        };

        if path.is_empty() {
            return Err(ConnectorError::connection(format!(
                "no database path in url: {}",
                url
            )));
        }
        Ok(path)
    }
}

impl Default for SqliteDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for SqliteDriver {
    type Connection = SqliteConnection;

    fn connect(&self, settings: &ConnectionSettings) -> Result<SqliteConnection> {
        let path = Self::database_path(settings.url())?;
        debug!(path, "Opening SQLite database");

        let conn = Connection::open_with_flags(path, self.flags)?;
        if self.foreign_keys {
            conn.execute("PRAGMA foreign_keys = ON", [])?;
        }

        Ok(SqliteConnection { conn })
    }
}

/// An open SQLite connection
#[derive(Debug)]
pub struct SqliteConnection {
    conn: Connection,
}

impl SqliteConnection {
    /// Bind every value at its 1-based position
    ///
    /// A count mismatch is reported as rusqlite's `InvalidParameterCount`.
    fn bind(stmt: &mut Statement<'_>, params: &[BoundValue]) -> Result<()> {
        let expected = stmt.parameter_count();
        if expected != params.len() {
            return Err(rusqlite::Error::InvalidParameterCount(params.len(), expected).into());
        }
        for (i, value) in params.iter().enumerate() {
            stmt.raw_bind_parameter(i + 1, value)?;
        }
        Ok(())
    }

    /// Stringify one cell; NULL stays `None`
    ///
    /// Reals use `Debug` formatting, which keeps the trailing `.0` of whole
    /// values (`2.0`, not `2`) the way SQLite renders them as text.
    fn cell_text(value: ValueRef<'_>) -> Option<String> {
        match value {
            ValueRef::Null => None,
            ValueRef::Integer(v) => Some(v.to_string()),
            ValueRef::Real(v) => Some(format!("{:?}", v)),
            ValueRef::Text(v) | ValueRef::Blob(v) => Some(String::from_utf8_lossy(v).into_owned()),
        }
    }

    fn collect_rows(stmt: &mut Statement<'_>, names: &[String]) -> Result<QueryResult> {
        let mut result = QueryResult::new();
        let mut rows = stmt.raw_query();

        while let Some(row) = rows.next()? {
            let mut db_row = DatabaseRow::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let value = Self::cell_text(row.get_ref(i)?);
                db_row.add_column(DatabaseColumn::new(name.as_str(), value));
            }
            result.add_row(db_row);
        }

        Ok(result)
    }
}

impl DriverConnection for SqliteConnection {
    fn is_closed(&self) -> bool {
        false
    }

    fn execute(&mut self, sql: &str, params: &[BoundValue]) -> Result<u64> {
        let mut stmt = self.conn.prepare(sql)?;
        Self::bind(&mut stmt, params)?;
        let affected = stmt.raw_execute()?;
        stmt.finalize()?;

        Ok(affected as u64)
    }

    fn select(&mut self, sql: &str, params: &[BoundValue]) -> Result<QueryResult> {
        let mut stmt = self.conn.prepare(sql)?;
        Self::bind(&mut stmt, params)?;

        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        // Rows borrow the statement and are dropped inside collect_rows
        let result = Self::collect_rows(&mut stmt, &names)?;
        stmt.finalize()?;

        Ok(result)
    }

    fn close(self) -> Result<()> {
        // On failure rusqlite hands the connection back; dropping it releases it
        self.conn.close().map_err(|(_conn, e)| ConnectorError::from(e))
    }
}
