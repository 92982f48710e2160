//! Client wrapper over the external libsql connection
//!
//! [`Client`] owns a database handle and a single connection, forwarding
//! statements unchanged. It adds no pooling or scheduling; replica sync
//! cadence is interpreted entirely by the client library.

use std::time::Duration;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use libsql::Builder;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use super::settings::{ConnectionMode, ConnectionSettings};
use super::statement::Statement;

/// Default file backing an embedded replica when none is configured.
pub const DEFAULT_REPLICA_PATH: &str = "skiff-replica.db";

/// A row returned by a query, keyed by column name.
pub type Row = Map<String, JsonValue>;

pub struct Client {
    db: libsql::Database,
    conn: libsql::Connection,
}

impl Client {
    /// Connect using the given settings
    ///
    /// The URL decides the constructor: remote for `http(s)://` and
    /// `libsql://`, embedded replica when a sync URL is set, local file or
    /// in-memory otherwise.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self> {
        settings.validate()?;

        let db = match settings.mode() {
            ConnectionMode::Local(path) => {
                debug!(path = path.as_str(), "opening local database");
                Builder::new_local(path.as_str())
                    .build()
                    .await
                    .map_err(|e| anyhow!("Failed to open local database '{}': {}", path, e))?
            }
            ConnectionMode::Remote => {
                debug!(url = settings.url.as_str(), "connecting to remote database");
                Builder::new_remote(
                    settings.url.clone(),
                    settings.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await
                .map_err(|e| anyhow!("Failed to connect to '{}': {}", settings.url, e))?
            }
            ConnectionMode::Replica => {
                let sync_url = settings
                    .sync_url
                    .clone()
                    .ok_or_else(|| anyhow!("replica mode requires a sync_url"))?;
                let replica_path = settings
                    .replica_path
                    .clone()
                    .unwrap_or_else(|| DEFAULT_REPLICA_PATH.to_string());
                debug!(
                    path = replica_path.as_str(),
                    sync_url = sync_url.as_str(),
                    "opening embedded replica"
                );
                let mut builder = Builder::new_remote_replica(
                    replica_path.as_str(),
                    sync_url.clone(),
                    settings.auth_token.clone().unwrap_or_default(),
                );
                if let Some(secs) = settings.sync_interval_secs {
                    builder = builder.sync_interval(Duration::from_secs(secs));
                }
                builder
                    .build()
                    .await
                    .map_err(|e| anyhow!("Failed to open replica of '{}': {}", sync_url, e))?
            }
        };

        let conn = db
            .connect()
            .map_err(|e| anyhow!("Failed to create connection: {}", e))?;

        Ok(Client { db, conn })
    }

    /// Execute a statement, returning the affected-row count
    pub async fn execute(&self, stmt: &Statement) -> Result<u64> {
        self.conn
            .execute(stmt.sql.as_str(), stmt.params())
            .await
            .map_err(|e| anyhow!("Failed to execute statement: {}", e))
    }

    /// Run a query, returning rows as JSON objects keyed by column name
    pub async fn query(&self, stmt: &Statement) -> Result<Vec<Row>> {
        let mut rows = self
            .conn
            .query(stmt.sql.as_str(), stmt.params())
            .await
            .map_err(|e| anyhow!("Failed to run query: {}", e))?;

        let column_count = rows.column_count();
        let mut names = Vec::with_capacity(column_count as usize);
        for i in 0..column_count {
            names.push(
                rows.column_name(i)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("column_{}", i)),
            );
        }

        let mut results = vec![];
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| anyhow!("Failed to read row: {}", e))?
        {
            let mut object = Map::new();
            for (i, name) in names.iter().enumerate() {
                let value = row
                    .get_value(i as i32)
                    .map_err(|e| anyhow!("Failed to read column '{}': {}", name, e))?;
                object.insert(name.clone(), value_to_json(value));
            }
            results.push(object);
        }

        Ok(results)
    }

    /// Run a query and return the first row, if any
    pub async fn query_first(&self, stmt: &Statement) -> Result<Option<Row>> {
        Ok(self.query(stmt).await?.into_iter().next())
    }

    /// Execute statements atomically inside a single transaction
    pub async fn batch(&self, statements: &[Statement]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .await
            .map_err(|e| anyhow!("Failed to begin transaction: {}", e))?;

        for stmt in statements {
            tx.execute(stmt.sql.as_str(), stmt.params())
                .await
                .map_err(|e| anyhow!("Failed to execute batch statement: {}", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| anyhow!("Failed to commit transaction: {}", e))
    }

    /// Connectivity check (`SELECT 1`)
    pub async fn ping(&self) -> Result<()> {
        let rows = self.query(&Statement::new("SELECT 1 as test")).await?;
        match rows.first().and_then(|r| r.get("test")) {
            Some(JsonValue::Number(n)) if n.as_i64() == Some(1) => Ok(()),
            other => Err(anyhow!("unexpected ping response: {:?}", other)),
        }
    }

    /// Sync an embedded replica with its remote
    pub async fn sync(&self) -> Result<()> {
        self.db
            .sync()
            .await
            .map_err(|e| anyhow!("Failed to sync replica: {}", e))?;
        Ok(())
    }
}

fn value_to_json(value: libsql::Value) -> JsonValue {
    match value {
        libsql::Value::Null => JsonValue::Null,
        libsql::Value::Integer(i) => JsonValue::from(i),
        libsql::Value::Real(f) => JsonValue::from(f),
        libsql::Value::Text(s) => JsonValue::from(s),
        libsql::Value::Blob(b) => JsonValue::from(general_purpose::STANDARD.encode(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::SqlValue;

    async fn memory_client() -> Client {
        Client::connect(&ConnectionSettings::new(":memory:"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_execute_and_query() {
        let client = memory_client().await;
        client
            .execute(&Statement::new(
                "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT)",
            ))
            .await
            .unwrap();

        let inserted = client
            .execute(
                &Statement::new("INSERT INTO users (email) VALUES (?)").arg("user@example.com"),
            )
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let rows = client
            .query(&Statement::new("SELECT * FROM users WHERE email = ?").arg("user@example.com"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("email").and_then(|v| v.as_str()),
            Some("user@example.com")
        );
    }

    #[tokio::test]
    async fn test_batch_commits_atomically() {
        let client = memory_client().await;
        client
            .execute(&Statement::new(
                "CREATE TABLE posts (title TEXT, content TEXT, published INTEGER DEFAULT 0)",
            ))
            .await
            .unwrap();

        client
            .batch(&[
                Statement::with_args(
                    "INSERT INTO posts (title, content) VALUES (?, ?)",
                    vec![
                        SqlValue::from("Hello World"),
                        SqlValue::from("This is my first post"),
                    ],
                ),
                Statement::new("UPDATE posts SET published = 1 WHERE title = ?")
                    .arg("Hello World"),
            ])
            .await
            .unwrap();

        let published = client
            .query(&Statement::new("SELECT * FROM posts WHERE published = ?").arg(1i64))
            .await
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(
            published[0].get("title").and_then(|v| v.as_str()),
            Some("Hello World")
        );
    }

    #[tokio::test]
    async fn test_query_first() {
        let client = memory_client().await;
        client
            .execute(&Statement::new("CREATE TABLE items (id INTEGER PRIMARY KEY)"))
            .await
            .unwrap();

        let missing = client
            .query_first(&Statement::new("SELECT * FROM items WHERE id = ?").arg(1i64))
            .await
            .unwrap();
        assert!(missing.is_none());

        client
            .execute(&Statement::new("INSERT INTO items (id) VALUES (1)"))
            .await
            .unwrap();
        let found = client
            .query_first(&Statement::new("SELECT * FROM items WHERE id = ?").arg(1i64))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_ping() {
        let client = memory_client().await;
        client.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_null_values_round_trip() {
        let client = memory_client().await;
        client
            .execute(&Statement::new("CREATE TABLE t (a TEXT, b REAL)"))
            .await
            .unwrap();
        client
            .execute(&Statement::with_args(
                "INSERT INTO t (a, b) VALUES (?, ?)",
                vec![SqlValue::Null, SqlValue::from(1.5f64)],
            ))
            .await
            .unwrap();

        let rows = client.query(&Statement::new("SELECT * FROM t")).await.unwrap();
        assert_eq!(rows[0].get("a"), Some(&JsonValue::Null));
        assert_eq!(rows[0].get("b").and_then(|v| v.as_f64()), Some(1.5));
    }
}
