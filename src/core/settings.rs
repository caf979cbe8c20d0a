//! Connection settings
//!
//! Credentials can be given directly or read from a settings file holding
//! three plain-text lines: connection URL, user name, password.
//!
//! ```text
//! jdbc:sqlite:/var/lib/app/data.db
//! UserName
//! Password
//! ```

use super::database_types::DatabaseType;
use super::error::{ConnectorError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Credentials used to open a connection
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    url: String,
    user: String,
    password: String,
}

impl ConnectionSettings {
    /// Create settings from explicit credentials
    pub fn new<U, N, P>(url: U, user: N, password: P) -> Self
    where
        U: Into<String>,
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            url: url.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Read settings from a three-line settings file
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::IoError`] if the file cannot be read and
    /// [`ConnectorError::Settings`] if it has no URL line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded connection settings from {:?}", path);
        content.parse()
    }

    /// Connection URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// User name
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Database family named by the URL scheme
    pub fn database_type(&self) -> DatabaseType {
        DatabaseType::from_url(&self.url)
    }
}

impl FromStr for ConnectionSettings {
    type Err = ConnectorError;

    /// Parse the settings file format. Lines are taken verbatim; missing user
    /// and password lines become empty strings.
    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines().map(|line| line.strip_suffix('\r').unwrap_or(line));

        let url = match lines.next() {
            Some(url) if !url.is_empty() => url,
            _ => return Err(ConnectorError::settings("missing connection url line")),
        };
        let user = lines.next().unwrap_or_default();
        let password = lines.next().unwrap_or_default();

        Ok(Self::new(url, user, password))
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_three_lines() {
        let settings: ConnectionSettings = "jdbc://host/db\nalice\nsecret\n".parse().unwrap();
        assert_eq!(settings.url(), "jdbc://host/db");
        assert_eq!(settings.user(), "alice");
        assert_eq!(settings.password(), "secret");
    }

    #[test]
    fn test_parse_keeps_lines_verbatim() {
        let settings: ConnectionSettings = "sqlite:a.db\r\n bob \r\npa ss\r\nignored\n"
            .parse()
            .unwrap();
        assert_eq!(settings.url(), "sqlite:a.db");
        assert_eq!(settings.user(), " bob ");
        assert_eq!(settings.password(), "pa ss");
        assert_eq!(settings.database_type(), DatabaseType::Sqlite);
    }

    #[test]
    fn test_parse_missing_lines() {
        let settings: ConnectionSettings = ":memory:".parse().unwrap();
        assert_eq!(settings.user(), "");
        assert_eq!(settings.password(), "");

        assert!(matches!(
            "".parse::<ConnectionSettings>(),
            Err(ConnectorError::Settings(_))
        ));
        assert!(matches!(
            "\nalice\nsecret".parse::<ConnectionSettings>(),
            Err(ConnectorError::Settings(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "jdbc://host/db\nalice\nsecret").unwrap();

        let settings = ConnectionSettings::from_file(file.path()).unwrap();
        assert_eq!(
            settings,
            ConnectionSettings::new("jdbc://host/db", "alice", "secret")
        );
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConnectionSettings::from_file(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, ConnectorError::IoError(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let settings = ConnectionSettings::new("sqlite:a.db", "alice", "secret");
        let debug = format!("{:?}", settings);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }
}
