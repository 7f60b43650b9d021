use std::sync::Mutex;

// Leading `::` disambiguates the postgres crate from this module.
use ::postgres::types::{ToSql, Type};
use ::postgres::{Client, NoTls};

use crate::{Row, SQLError, SQLStore, Value};

/// Networked PostgreSQL backend (sync client).
///
/// Statements arrive in the SQLite `?N` placeholder dialect and are
/// renumbered to `$N` before execution. None of the statements in this
/// workspace contain a literal `?`.
pub struct PostgresStore {
    conn: Mutex<Client>,
}

impl PostgresStore {
    /// Connect with explicit credentials, typically from environment
    /// configuration.
    pub fn connect(
        host: &str,
        port: u16,
        dbname: &str,
        user: &str,
        password: &str,
    ) -> Result<Self, SQLError> {
        let client = ::postgres::Config::new()
            .host(host)
            .port(port)
            .dbname(dbname)
            .user(user)
            .password(password)
            .connect(NoTls)
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(client),
        })
    }
}

/// Rewrite `?1 ?2 …` placeholders to PostgreSQL's `$1 $2 …`.
fn rewrite_placeholders(sql: &str) -> String {
    sql.replace('?', "$")
}

fn bind(params: &[Value]) -> Vec<Box<dyn ToSql + Sync + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn ToSql + Sync + '_> {
            match v {
                Value::Integer(i) => Box::new(*i),
                Value::Text(s) => Box::new(s.as_str()),
            }
        })
        .collect()
}

/// Read one column, insisting on the integer and text types the task
/// schema uses (counts come back as INT8, the task columns as
/// TEXT/BIGINT). Anything else in a result set errors instead of
/// coercing.
fn read_column(row: &::postgres::Row, idx: usize) -> Result<Value, SQLError> {
    let column = &row.columns()[idx];
    let ty = column.type_();

    let value = if *ty == Type::INT2 {
        row.try_get::<_, i16>(idx).map(|v| Value::Integer(v as i64))
    } else if *ty == Type::INT4 {
        row.try_get::<_, i32>(idx).map(|v| Value::Integer(v as i64))
    } else if *ty == Type::INT8 {
        row.try_get::<_, i64>(idx).map(Value::Integer)
    } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR {
        row.try_get::<_, String>(idx).map(Value::Text)
    } else {
        return Err(SQLError::Statement(format!(
            "column '{}' has unsupported type {ty}",
            column.name()
        )));
    };

    value.map_err(|e| SQLError::Statement(format!("column '{}': {e}", column.name())))
}

impl SQLStore for PostgresStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Statement(e.to_string()))?;

        let args = bind(params);
        let arg_refs: Vec<&(dyn ToSql + Sync)> = args.iter().map(|b| b.as_ref()).collect();

        let rows = conn
            .query(rewrite_placeholders(sql).as_str(), arg_refs.as_slice())
            .map_err(|e| SQLError::Statement(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut columns = Vec::with_capacity(row.len());
            for (idx, column) in row.columns().iter().enumerate() {
                columns.push((column.name().to_string(), read_column(row, idx)?));
            }
            out.push(Row { columns });
        }
        Ok(out)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Statement(e.to_string()))?;

        let args = bind(params);
        let arg_refs: Vec<&(dyn ToSql + Sync)> = args.iter().map(|b| b.as_ref()).collect();

        conn.execute(rewrite_placeholders(sql).as_str(), arg_refs.as_slice())
            .map_err(|e| SQLError::Statement(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_rewrite() {
        assert_eq!(
            rewrite_placeholders("SELECT data FROM tasks WHERE id = ?1"),
            "SELECT data FROM tasks WHERE id = $1"
        );
        assert_eq!(
            rewrite_placeholders("INSERT INTO t (a, b) VALUES (?1, ?2)"),
            "INSERT INTO t (a, b) VALUES ($1, $2)"
        );
        assert_eq!(rewrite_placeholders("SELECT 1"), "SELECT 1");
    }
}
