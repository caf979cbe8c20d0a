//! Database driver implementations
//!
//! This module contains concrete implementations of the Driver trait.

pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::{ExecutionKind, InMemoryConnection, InMemoryDriver, RecordedExecution};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConnection, SqliteDriver};
