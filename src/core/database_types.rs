//! Database type definitions
//!
//! The family of a database is read off the scheme of its connection URL so a
//! driver can refuse URLs meant for another client.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Relational database families recognised in connection URLs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
    /// No recognised scheme (bare file path, `:memory:`, ...)
    #[default]
    None,
    /// PostgreSQL database
    Postgres,
    /// MySQL/MariaDB database
    Mysql,
    /// SQLite database
    Sqlite,
    /// Oracle database
    Oracle,
}

impl DatabaseType {
    /// Convert database type to string representation
    pub fn to_str(&self) -> &'static str {
        match self {
            DatabaseType::None => "none",
            DatabaseType::Postgres => "postgres",
            DatabaseType::Mysql => "mysql",
            DatabaseType::Sqlite => "sqlite",
            DatabaseType::Oracle => "oracle",
        }
    }

    /// Infer the database type from a connection URL
    ///
    /// A leading `jdbc:` is skipped, then the scheme up to the next `:` is
    /// matched. Unknown or missing schemes give [`DatabaseType::None`].
    ///
    /// ```
    /// use rust_database_connector::DatabaseType;
    ///
    /// assert_eq!(DatabaseType::from_url("jdbc:mysql://localhost:3306/db"), DatabaseType::Mysql);
    /// assert_eq!(DatabaseType::from_url("sqlite://data.db"), DatabaseType::Sqlite);
    /// assert_eq!(DatabaseType::from_url("/var/lib/app.db"), DatabaseType::None);
    /// ```
    pub fn from_url(url: &str) -> Self {
        let url = url.strip_prefix("jdbc:").unwrap_or(url);
        url.split_once(':')
            .and_then(|(scheme, _)| scheme.parse().ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(DatabaseType::None),
            "postgres" | "postgresql" => Ok(DatabaseType::Postgres),
            "mysql" | "mariadb" => Ok(DatabaseType::Mysql),
            "sqlite" | "sqlite3" => Ok(DatabaseType::Sqlite),
            "oracle" => Ok(DatabaseType::Oracle),
            _ => Err(format!("Invalid database type: '{}'", s)),
        }
    }
}
