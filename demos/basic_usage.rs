//! Basic connector usage example
//!
//! This example demonstrates:
//! - Creating tables
//! - Inserting data with typed parameters
//! - Querying data into rows of named columns
//! - Handling a rejected query
//!
//! Run with: cargo run --example basic_usage

use rust_database_connector::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Rust Database Connector - Basic Usage Example ===\n");

    // Every operation opens and closes its own connection, so use a file
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite:{}", dir.path().join("demo.db").display());
    let mut connector = SqliteConnector::new(url, "demo", "");

    println!("1. Creating table...");
    connector.execute_update(&Query::with_template(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            age INTEGER,
            balance REAL
        )",
    ))?;
    println!("   ✓ Table created\n");

    println!("2. Inserting data...");
    let users = vec![
        (1, "alice", 30, 1500.50),
        (2, "bob", 25, 2300.75),
        (3, "charlie", 35, 980.25),
    ];
    for (id, username, age, balance) in users {
        let mut insert =
            Query::with_template("INSERT INTO users (id, username, age, balance) VALUES (?, ?, ?, ?)");
        insert
            .add_int(id)
            .add_text(username)
            .add_int(age)
            .add_double(balance);
        let affected = connector.execute_update(&insert)?;
        println!("   ✓ Inserted {} row(s)", affected);
    }
    println!();

    println!("3. Querying users with balance > $1000...");
    let mut select = Query::with_template(
        "SELECT username, balance FROM users WHERE balance > ? ORDER BY balance DESC",
    );
    select.add_double(1000.0);
    let result = connector.execute_select(&select)?;
    println!("   Found {} users:", result.row_count());
    for row in &result {
        let columns: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("   - {}", columns.join(", "));
    }
    println!();

    println!("4. Querying a missing user...");
    let mut select = Query::with_template("SELECT * FROM users WHERE id = ?");
    select.add_int(42);
    let result = connector.execute_select(&select)?;
    println!("   Found {} rows\n", result.row_count());

    println!("5. Sending an empty query...");
    match connector.execute_update(&Query::new()) {
        Err(e) if e.is_invalid_query() => println!("   ✓ Rejected: {}\n", e),
        other => println!("   ✗ Unexpected outcome: {:?}\n", other),
    }

    println!("6. Connected after all that? {}", connector.is_connected());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
