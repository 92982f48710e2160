//! SQL statements with positional arguments
//!
//! A [`Statement`] pairs SQL text with the positional values bound to its
//! `?` placeholders. Both are forwarded verbatim to the underlying client.

use libsql::params::Params;
use libsql::Value;

/// A positional argument value for a SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<SqlValue> for Value {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(i) => Value::Integer(i),
            SqlValue::Real(f) => Value::Real(f),
            SqlValue::Text(s) => Value::Text(s),
            SqlValue::Blob(b) => Value::Blob(b),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(value as i64)
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        SqlValue::Integer(value as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Integer(value as i64)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Blob(value)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// SQL statement plus positional argument list.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl Statement {
    /// Create a statement without arguments
    pub fn new(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            args: vec![],
        }
    }

    /// Create a statement with a full argument list
    pub fn with_args(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Statement {
            sql: sql.into(),
            args,
        }
    }

    /// Append a single positional argument
    pub fn arg(mut self, value: impl Into<SqlValue>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Convert the argument list to the client library's parameter form
    pub(crate) fn params(&self) -> Params {
        Params::Positional(self.args.iter().cloned().map(Value::from).collect())
    }
}

impl From<&str> for Statement {
    fn from(sql: &str) -> Self {
        Statement::new(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_builder() {
        let stmt = Statement::new("SELECT * FROM users WHERE email = ?").arg("user@example.com");
        assert_eq!(stmt.sql, "SELECT * FROM users WHERE email = ?");
        assert_eq!(
            stmt.args,
            vec![SqlValue::Text("user@example.com".to_string())]
        );
    }

    #[test]
    fn test_statement_with_args() {
        let stmt = Statement::with_args(
            "INSERT INTO posts (title, published) VALUES (?, ?)",
            vec![SqlValue::from("Hello World"), SqlValue::from(1i64)],
        );
        assert_eq!(stmt.args.len(), 2);
        assert_eq!(stmt.args[1], SqlValue::Integer(1));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(SqlValue::from(42i64), SqlValue::Integer(42));
        assert_eq!(SqlValue::from(1.5f64), SqlValue::Real(1.5));
        assert_eq!(SqlValue::from(true), SqlValue::Integer(1));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(
            SqlValue::from(Some("text")),
            SqlValue::Text("text".to_string())
        );
    }

    #[test]
    fn test_params_positional() {
        let stmt = Statement::new("SELECT ?").arg(7i64);
        match stmt.params() {
            Params::Positional(values) => {
                assert_eq!(values, vec![Value::Integer(7)]);
            }
            _ => panic!("expected positional params"),
        }
    }
}
