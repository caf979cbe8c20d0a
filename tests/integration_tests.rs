//! Integration tests for the connector
//!
//! These tests run the connector end to end:
//! - Round trips against an on-disk SQLite database
//! - Error propagation from the database
//! - Connection release on every exit path
//! - Settings file loading

#[cfg(feature = "sqlite")]
mod sqlite_tests {
    use rust_database_connector::prelude::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// A connector on a fresh database file. The file has to outlive single
    /// operations because every operation uses its own connection.
    fn file_connector() -> (TempDir, SqliteConnector) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("jdbc:sqlite:{}", dir.path().join("test.db").display());
        (dir, SqliteConnector::new(url, "user", "password"))
    }

    fn update(connector: &mut SqliteConnector, sql: &str) {
        connector
            .execute_update(&Query::with_template(sql))
            .expect("Update failed");
    }

    #[test]
    fn test_select_round_trip() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table t (id INTEGER, name TEXT, extra TEXT)");

        let mut insert = Query::with_template("insert into t values (?, ?, ?)");
        insert.add_int(120).add_text("testName").add_text("x");
        assert_eq!(connector.execute_update(&insert).expect("Insert failed"), 1);
        update(&mut connector, "insert into t values (121, 'other', 'y')");

        let mut query = Query::with_template("select * from t where id = ? and name = ?");
        query.add_int(120).add_text("testName");
        let result = connector.execute_select(&query).expect("Select failed");

        let expected: QueryResult = vec![vec![
            DatabaseColumn::new("id", Some("120".to_string())),
            DatabaseColumn::new("name", Some("testName".to_string())),
            DatabaseColumn::new("extra", Some("x".to_string())),
        ]
        .into_iter()
        .collect::<DatabaseRow>()]
        .into_iter()
        .collect();
        assert_eq!(result, expected);
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_select_zero_rows() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table t (id INTEGER)");

        let mut query = Query::with_template("select * from t where id = ?");
        query.add_int(1);
        let result = connector.execute_select(&query).expect("Select failed");

        assert!(result.is_empty());
        assert_eq!(result.row_count(), 0);
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_all_parameter_types() {
        let (_dir, mut connector) = file_connector();
        update(
            &mut connector,
            "create table m (label TEXT, qty INTEGER, ratio REAL, price REAL)",
        );

        let mut insert = Query::with_template("insert into m values (?, ?, ?, ?)");
        insert
            .add_parameter("widget", ParameterType::Text)
            .add_parameter("-7", ParameterType::Int)
            .add_parameter("0.25", ParameterType::Float)
            .add_parameter("19.99", ParameterType::Double);
        connector.execute_update(&insert).expect("Insert failed");

        let result = connector
            .execute_select(&Query::with_template("select * from m"))
            .expect("Select failed");
        let row = result.get_row(0).expect("Row missing");
        let values: Vec<_> = row.iter().filter_map(DatabaseColumn::value).collect();
        assert_eq!(values, vec!["widget", "-7", "0.25", "19.99"]);
    }

    #[test]
    fn test_float_round_trip_is_exact_decimal() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table m (ratio REAL, total REAL)");

        let mut insert = Query::with_template("insert into m values (?, ?)");
        insert
            .add_parameter("0.1", ParameterType::Float)
            .add_parameter("2.0", ParameterType::Double);
        connector.execute_update(&insert).expect("Insert failed");

        let mut select = Query::with_template("select ratio, total from m where ratio = ?");
        select.add_parameter("0.1", ParameterType::Double);
        let result = connector.execute_select(&select).expect("Select failed");
        assert_eq!(result.row_count(), 1);

        let row = result.get_row(0).expect("Row missing");
        assert_eq!(row.get("ratio").and_then(DatabaseColumn::value), Some("0.1"));
        assert_eq!(row.get("total").and_then(DatabaseColumn::value), Some("2.0"));
    }

    #[test]
    fn test_null_values() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table t (id INTEGER, name TEXT)");
        update(&mut connector, "insert into t (id) values (1)");
        update(&mut connector, "insert into t values (2, '')");

        let result = connector
            .execute_select(&Query::with_template("select name from t order by id"))
            .expect("Select failed");
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows()[0].columns()[0].value(), None);
        assert_eq!(result.rows()[1].columns()[0].value(), Some(""));
    }

    #[test]
    fn test_update_counts_rows() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table t (id INTEGER, flag INTEGER)");
        for id in 0..5 {
            let mut insert = Query::with_template("insert into t values (?, 0)");
            insert.add_int(id);
            connector.execute_update(&insert).expect("Insert failed");
        }

        let mut query = Query::with_template("update t set flag = 1 where id >= ?");
        query.add_int(2);
        assert_eq!(connector.execute_update(&query).expect("Update failed"), 3);
    }

    #[test]
    fn test_constraint_violation_propagates() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table t (id INTEGER PRIMARY KEY)");
        update(&mut connector, "insert into t values (1)");

        let mut insert = Query::with_template("insert into t values (?)");
        insert.add_int(1);
        let err = connector.execute_update(&insert).unwrap_err();

        assert!(err.is_connection());
        assert!(matches!(err, ConnectorError::SqliteError(_)));
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table parent (id INTEGER PRIMARY KEY)");
        update(
            &mut connector,
            "create table child (id INTEGER, parent_id INTEGER REFERENCES parent(id))",
        );

        let mut insert = Query::with_template("insert into child values (?, ?)");
        insert.add_int(1).add_int(99);
        assert!(connector.execute_update(&insert).unwrap_err().is_connection());
    }

    #[test]
    fn test_invalid_sql_closes_connection() {
        let (_dir, mut connector) = file_connector();
        connector.open_connection().expect("Failed to connect");
        assert!(connector.is_connected());

        let err = connector
            .execute_select(&Query::with_template("selec * from nowhere"))
            .unwrap_err();
        assert!(err.is_connection());
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_parameter_count_mismatch_is_database_error() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table t (id INTEGER, name TEXT)");

        let mut query = Query::with_template("select * from t where id = ? and name = ?");
        query.add_int(1);
        assert!(query.is_valid());

        let err = connector.execute_select(&query).unwrap_err();
        assert!(err.is_connection());
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_empty_template_rejected() {
        let (_dir, mut connector) = file_connector();
        let query = Query::with_template("");
        assert!(!query.is_valid());

        assert!(connector.execute_update(&query).unwrap_err().is_invalid_query());
        assert!(connector.execute_select(&query).unwrap_err().is_invalid_query());
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_format_error_writes_nothing() {
        let (_dir, mut connector) = file_connector();
        update(&mut connector, "create table t (id INTEGER, name TEXT)");

        let mut insert = Query::with_template("insert into t values (?, ?)");
        insert
            .add_parameter("1O", ParameterType::Int)
            .add_text("typo");
        assert!(connector.execute_update(&insert).unwrap_err().is_format());

        let result = connector
            .execute_select(&Query::with_template("select * from t"))
            .expect("Select failed");
        assert!(result.is_empty());
    }

    #[test]
    fn test_memory_database_does_not_survive_operations() {
        let mut connector = SqliteConnector::new(":memory:", "", "");
        update(&mut connector, "create table t (id INTEGER)");

        let err = connector
            .execute_select(&Query::with_template("select * from t"))
            .unwrap_err();
        assert!(err.is_connection());
    }

    #[test]
    fn test_wrong_url_scheme() {
        let mut connector = SqliteConnector::new("jdbc:mysql://localhost:3306/db", "u", "p");
        let err = connector
            .execute_select(&Query::with_template("select 1"))
            .unwrap_err();
        assert!(matches!(err, ConnectorError::ConnectionError(_)));
        assert!(connector.open_connection().is_err());
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_connector_from_settings_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("settings.db");
        let settings_path = dir.path().join("db.settings");

        let mut file = std::fs::File::create(&settings_path).expect("Failed to create file");
        write!(file, "sqlite:{}\nalice\nsecret\n", db_path.display()).expect("Write failed");

        let mut connector =
            SqliteConnector::from_settings_file(&settings_path).expect("Failed to load settings");
        assert_eq!(connector.settings().user(), "alice");
        assert_eq!(connector.settings().password(), "secret");

        update(&mut connector, "create table t (id INTEGER)");
        assert!(db_path.exists());
    }

    #[test]
    fn test_settings_file_scenario() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create file");
        writeln!(file, "jdbc://host/db").expect("Write failed");
        writeln!(file, "alice").expect("Write failed");
        writeln!(file, "secret").expect("Write failed");

        let connector =
            SqliteConnector::from_settings_file(file.path()).expect("Failed to load settings");
        assert_eq!(connector.settings().url(), "jdbc://host/db");
        assert_eq!(connector.settings().user(), "alice");
        assert_eq!(connector.settings().password(), "secret");
        assert!(!connector.is_connected());
    }

    #[test]
    fn test_missing_settings_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = SqliteConnector::from_settings_file(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConnectorError::IoError(_)));
    }

    #[test]
    fn test_reload_settings() {
        let (_dir, mut connector) = file_connector();

        let mut file = tempfile::NamedTempFile::new().expect("Failed to create file");
        write!(file, ":memory:\nbob\n").expect("Write failed");

        connector
            .load_settings_file(file.path())
            .expect("Failed to reload settings");
        assert_eq!(connector.settings().url(), ":memory:");
        assert_eq!(connector.settings().user(), "bob");
        assert_eq!(connector.settings().password(), "");
    }
}

mod in_memory_tests {
    use rust_database_connector::backends::{ExecutionKind, InMemoryDriver};
    use rust_database_connector::prelude::*;
    use rust_database_connector::BoundValue;

    fn connector(driver: &InMemoryDriver) -> Connector<InMemoryDriver> {
        Connector::with_driver(
            driver.clone(),
            ConnectionSettings::new("memory:orders", "app", "pw"),
        )
    }

    #[test]
    fn test_exactly_one_execution_per_update() {
        let driver = InMemoryDriver::new();
        let mut connector = connector(&driver);

        let mut query = Query::with_template("update orders set total = ? where id = ?");
        query.add_double(12.5).add_int(4);
        connector.execute_update(&query).expect("Update failed");

        driver.assert_execution_count(1);
        driver.assert_last_execution(
            ExecutionKind::Update,
            "update orders set total = ? where id = ?",
            &[BoundValue::Double(12.5), BoundValue::Int(4)],
        );
        assert_eq!(driver.connect_count(), 1);
        assert_eq!(driver.close_count(), 1);
    }

    #[test]
    fn test_credentials_reach_driver() {
        let driver = InMemoryDriver::new();
        let mut connector = connector(&driver);
        connector
            .execute_select(&Query::with_template("select 1"))
            .expect("Select failed");

        let settings = driver.last_settings().expect("No connect recorded");
        assert_eq!(settings.url(), "memory:orders");
        assert_eq!(settings.user(), "app");
        assert_eq!(settings.password(), "pw");
    }

    #[test]
    fn test_unsupported_type_tag_never_executes() {
        let driver = InMemoryDriver::new();
        let mut connector = connector(&driver);

        let mut query = Query::with_template("select * from t where flag = ? and id = ?");
        let err = query.add_tagged_parameter("true", "boolean").unwrap_err();
        assert!(err.is_invalid_query());
        assert_eq!(query.parameter_count(), 0);

        assert_eq!(driver.connect_count(), 0);
        driver.assert_execution_count(0);

        // A known tag is accepted and bound with its declared type
        query
            .add_tagged_parameter("1", "intNumber")
            .expect("Known tag rejected");
        query.add_tagged_parameter("2", "int").expect("Known tag rejected");
        connector.execute_select(&query).expect("Select failed");
        driver.assert_last_execution(
            ExecutionKind::Select,
            "select * from t where flag = ? and id = ?",
            &[BoundValue::Int(1), BoundValue::Int(2)],
        );
    }

    #[test]
    fn test_every_operation_releases_connection() {
        let failing = InMemoryDriver::new().failing_execute("boom");
        let healthy = InMemoryDriver::new();

        for driver in [&failing, &healthy] {
            let mut connector = connector(driver);
            let _ = connector.execute_update(&Query::with_template("delete from t"));
            assert!(!connector.is_connected());
            let _ = connector.execute_select(&Query::with_template("select * from t"));
            assert!(!connector.is_connected());
            assert_eq!(driver.open_connections(), 0);
        }
    }
}
