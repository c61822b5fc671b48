//! Conversions between SQLite values and JSON.
//!
//! Rows are exposed by column name: a row becomes a JSON object whose keys
//! are the statement's column names. `serde_json::Map` keeps keys sorted, so
//! objects serialize in alphabetical key order, not column order.

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Row, Statement};
use serde_json::{Map, Number, Value};

/// Column names of a prepared statement, owned so rows can borrow them.
pub fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(String::from).collect()
}

/// Convert one row into a column-name keyed JSON object.
pub fn row_to_json(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<Map<String, Value>> {
    let mut record = Map::with_capacity(columns.len());
    for (idx, name) in columns.iter().enumerate() {
        record.insert(name.clone(), value_ref_to_json(row.get_ref(idx)?));
    }
    Ok(record)
}

/// Convert a borrowed SQLite value to JSON.
///
/// Text and blobs are decoded lossily; non-finite reals become null.
pub fn value_ref_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Convert a JSON value into an owned SQLite value for binding.
///
/// Booleans bind as 0/1 and arrays or objects bind as their JSON text.
pub fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
    }
}
