//! SQL execution seam shared by both storage backends.
//!
//! The tasks table is all TEXT and INTEGER columns, so the parameter and
//! row model stays deliberately narrow: a [`Value`] is text or an
//! integer, nothing wider. Backends implement [`SQLStore`]; the server
//! picks one at startup and tests swap in an in-memory database.

pub mod postgres;
pub mod sqlite;

pub use self::postgres::PostgresStore;
pub use self::sqlite::SqliteStore;

use thiserror::Error;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum SQLError {
    /// Could not open or reach the database.
    #[error("database connection: {0}")]
    Connection(String),

    /// A statement failed to prepare or run.
    #[error("sql statement: {0}")]
    Statement(String),
}

/// A bound parameter or result column.
///
/// Matches the task schema exactly: ids, titles, statuses, cities,
/// timestamps and serialized records are text; priorities and counts
/// are integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Text(String),
}

/// One result row, column name/value pairs in select-list order.
#[derive(Debug, Clone)]
pub struct Row {
    pub columns: Vec<(String, Value)>,
}

impl Row {
    /// Text column by name; `None` when absent or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.columns.iter().find_map(|(n, v)| match v {
            Value::Text(s) if n == name => Some(s.as_str()),
            _ => None,
        })
    }

    /// Integer column by name; `None` when absent or not an integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.columns.iter().find_map(|(n, v)| match v {
            Value::Integer(i) if n == name => Some(*i),
            _ => None,
        })
    }
}

/// Execution interface a storage backend provides.
///
/// Statements are written with SQLite-style `?N` placeholders; the
/// PostgreSQL backend renumbers them to `$N` before running.
pub trait SQLStore: Send + Sync {
    /// Run a SELECT and collect every row.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError>;

    /// Run an INSERT/UPDATE/DELETE/DDL statement; returns how many rows
    /// it touched.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row {
            columns: vec![
                ("status".into(), Value::Text("doing".into())),
                ("cnt".into(), Value::Integer(5)),
            ],
        }
    }

    #[test]
    fn typed_lookup_by_name() {
        let row = sample_row();
        assert_eq!(row.text("status"), Some("doing"));
        assert_eq!(row.integer("cnt"), Some(5));
        assert_eq!(row.text("absent"), None);
        assert_eq!(row.integer("absent"), None);
    }

    #[test]
    fn lookup_does_not_coerce_across_types() {
        let row = sample_row();
        assert_eq!(row.text("cnt"), None);
        assert_eq!(row.integer("status"), None);
    }
}
