use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, params_from_iter};

use crate::{Row, SQLError, SQLStore, Value};

/// Embedded SQLite backend (rusqlite, bundled).
///
/// A single connection serialized behind a mutex is plenty for this
/// service; WAL mode keeps concurrent reads from blocking on writes.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let conn =
            Connection::open(path).map_err(|e| SQLError::Connection(e.to_string()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self, SQLError> {
        let conn =
            Connection::open_in_memory().map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl rusqlite::ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Integer(i) => i.to_sql(),
            Value::Text(s) => s.to_sql(),
        }
    }
}

/// Read one column, insisting on the two storage classes the task
/// schema uses. A REAL, BLOB or NULL column in a result set is a bug in
/// the statement, not data to coerce.
fn read_column(row: &rusqlite::Row, idx: usize, name: &str) -> Result<Value, SQLError> {
    match row
        .get_ref(idx)
        .map_err(|e| SQLError::Statement(e.to_string()))?
    {
        ValueRef::Integer(i) => Ok(Value::Integer(i)),
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map(Value::Text)
            .map_err(|_| SQLError::Statement(format!("column '{name}' is not valid utf-8"))),
        other => Err(SQLError::Statement(format!(
            "column '{name}' has unsupported type {}",
            other.data_type()
        ))),
    }
}

impl SQLStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Statement(e.to_string()))?;

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SQLError::Statement(e.to_string()))?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = stmt
            .query(params_from_iter(params.iter()))
            .map_err(|e| SQLError::Statement(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| SQLError::Statement(e.to_string()))?
        {
            let mut columns = Vec::with_capacity(names.len());
            for (idx, name) in names.iter().enumerate() {
                columns.push((name.clone(), read_column(row, idx, name)?));
            }
            out.push(Row { columns });
        }
        Ok(out)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Statement(e.to_string()))?;

        let affected = conn
            .execute(sql, params_from_iter(params.iter()))
            .map_err(|e| SQLError::Statement(e.to_string()))?;
        Ok(affected as u64)
    }
}
