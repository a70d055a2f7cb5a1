use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::error::SqlError;
use crate::traits::{Row, SqlStore, Value};

/// SqliteStore is a SqlStore implementation backed by rusqlite (bundled SQLite).
///
/// `$n` placeholders are bound positionally: SQLite numbers `$`-prefixed
/// parameters in first-occurrence order, so a statement that uses
/// `$1..$n` ascending binds exactly like the params slice.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SqlError> {
        let conn = Connection::open(path)
            .map_err(|e| SqlError::Connection(e.to_string()))?;

        // WAL for concurrent readers; FK enforcement is off by default in
        // SQLite and the schema relies on ON DELETE CASCADE.
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| SqlError::Connection(e.to_string()))?;

        tracing::debug!("opened sqlite database at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SqlError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SqlError::Connection(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|e| SqlError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<Box<dyn rusqlite::types::ToSql + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn rusqlite::types::ToSql + '_> {
            match v {
                Value::Null => Box::new(rusqlite::types::Null),
                Value::Integer(i) => Box::new(*i),
                Value::Real(f) => Box::new(*f),
                Value::Text(s) => Box::new(s.as_str()),
                Value::Blob(b) => Box::new(b.as_slice()),
            }
        })
        .collect()
}

impl SqlStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SqlError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SqlError::Query(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SqlError::Query(e.to_string()))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                let mut columns = Vec::new();
                for (i, name) in column_names.iter().enumerate() {
                    let val = row_value_at(row, i);
                    columns.push((name.clone(), val));
                }
                Ok(Row { columns })
            })
            .map_err(|e| SqlError::Query(e.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| SqlError::Query(e.to_string()))?);
        }
        Ok(result)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SqlError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SqlError::Execution(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let affected = conn
            .execute(sql, param_refs.as_slice())
            .map_err(|e| SqlError::Execution(e.to_string()))?;

        Ok(affected as u64)
    }
}

/// Extract a Value from a rusqlite row at a given column index.
fn row_value_at(row: &rusqlite::Row, idx: usize) -> Value {
    // Try integer first, then real, then text, then blob, then null.
    if let Ok(i) = row.get::<_, i64>(idx) {
        return Value::Integer(i);
    }
    if let Ok(f) = row.get::<_, f64>(idx) {
        return Value::Real(f);
    }
    if let Ok(s) = row.get::<_, String>(idx) {
        return Value::Text(s);
    }
    if let Ok(b) = row.get::<_, Vec<u8>>(idx) {
        return Value::Blob(b);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .exec(
                "CREATE TABLE things (id INTEGER PRIMARY KEY, name TEXT NOT NULL, score REAL)",
                &[],
            )
            .unwrap();
        store
    }

    #[test]
    fn dollar_placeholders_bind_in_slice_order() {
        let store = test_store();
        store
            .query(
                "INSERT INTO things (id, name, score) VALUES ($1, $2, $3) RETURNING id",
                &[
                    Value::Integer(1),
                    Value::Text("alpha".into()),
                    Value::Real(0.5),
                ],
            )
            .unwrap();

        let rows = store
            .query(
                "SELECT id, name, score FROM things WHERE id = $1",
                &[Value::Integer(1)],
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("id"), Some(1));
        assert_eq!(rows[0].get_str("name"), Some("alpha"));
        assert_eq!(rows[0].get_f64("score"), Some(0.5));
    }

    #[test]
    fn returning_makes_zero_match_observable() {
        let store = test_store();
        let rows = store
            .query(
                "UPDATE things SET name = $1 WHERE id = $2 RETURNING id",
                &[Value::Text("renamed".into()), Value::Integer(42)],
            )
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn null_round_trips() {
        let store = test_store();
        store
            .query(
                "INSERT INTO things (id, name, score) VALUES ($1, $2, $3) RETURNING id",
                &[Value::Integer(2), Value::Text("beta".into()), Value::Null],
            )
            .unwrap();

        let rows = store
            .query("SELECT score FROM things WHERE id = $1", &[Value::Integer(2)])
            .unwrap();
        assert_eq!(rows[0].get("score"), Some(&Value::Null));
        assert_eq!(rows[0].get_f64("score"), None);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .exec("CREATE TABLE parents (id INTEGER PRIMARY KEY)", &[])
            .unwrap();
        store
            .exec(
                "CREATE TABLE children (id INTEGER PRIMARY KEY, \
                 parent_id INTEGER NOT NULL REFERENCES parents(id))",
                &[],
            )
            .unwrap();

        let err = store.exec(
            "INSERT INTO children (id, parent_id) VALUES ($1, $2)",
            &[Value::Integer(1), Value::Integer(99)],
        );
        assert!(err.is_err());
    }
}
