//! Settings file example
//!
//! This example demonstrates:
//! - Writing a three-line settings file (url, user, password)
//! - Building a connector from it
//! - Reading a result back column by column
//!
//! Run with: cargo run --example settings_file

use rust_database_connector::prelude::*;
use std::io::Write;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Rust Database Connector - Settings File Example ===\n");

    let dir = tempfile::tempdir()?;
    let settings_path = dir.path().join("db.settings");
    let db_path = dir.path().join("settings.db");

    println!("1. Writing settings file...");
    let mut file = std::fs::File::create(&settings_path)?;
    writeln!(file, "jdbc:sqlite:{}", db_path.display())?;
    writeln!(file, "UserName")?;
    writeln!(file, "Password")?;
    println!("   ✓ Wrote {}\n", settings_path.display());

    println!("2. Loading connector...");
    let mut connector = SqliteConnector::from_settings_file(&settings_path)?;
    println!("   ✓ {:?}\n", connector.settings());

    println!("3. Round trip...");
    connector.execute_update(&Query::with_template(
        "create table t (id INTEGER, name TEXT, extra TEXT)",
    ))?;

    let mut insert = Query::with_template("insert into t values (?, ?, ?)");
    insert.add_int(120).add_text("testName").add_text("x");
    connector.execute_update(&insert)?;

    let mut query = Query::with_template("select * from t where id = ? and name = ?");
    query.add_int(120).add_text("testName");
    let result = connector.execute_select(&query)?;

    for row_number in 0..result.row_count() {
        let Some(row) = result.get_row(row_number) else {
            continue;
        };
        for column_number in 0..row.column_count() {
            if let Some(column) = row.get_column(column_number) {
                println!("   row {} column {}: {}", row_number, column_number, column);
            }
        }
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
