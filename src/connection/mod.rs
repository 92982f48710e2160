//! Connection module
//!
//! Everything needed to configure and talk to a libSQL/Turso database:
//!
//! ```text
//! connection/
//! ├── settings    # ConnectionSettings value object + environment factories
//! ├── statement   # SQL text + positional arguments
//! └── client      # Client wrapper forwarding to the external library
//! ```
//!
//! # Deployment shapes
//!
//! | Factory | Target |
//! |---------|--------|
//! | [`ConnectionSettings::local`] | local dev server, no auth |
//! | [`ConnectionSettings::local_docker`] | local server behind a compose network |
//! | [`ConnectionSettings::local_with_auth`] | local server with `LIBSQL_JWT_TOKEN` |
//! | [`ConnectionSettings::turso_from_env`] | Turso Cloud (`TURSO_DATABASE_URL`/`TURSO_AUTH_TOKEN`) |
//! | [`ConnectionSettings::from_environment`] | picks one of the above from the deployment environment |
//! | [`ConnectionSettings::serverless_from_env`] | Turso Cloud with a periodically synced embedded replica |
//!
//! # Usage
//!
//! ```rust,ignore
//! use skiff::config::Environment;
//! use skiff::connection::{Client, ConnectionSettings, Statement};
//!
//! let settings = ConnectionSettings::from_environment(&Environment::detect())?;
//! let client = Client::connect(&settings).await?;
//!
//! let users = client
//!     .query(&Statement::new("SELECT * FROM users WHERE email = ?").arg("user@example.com"))
//!     .await?;
//! ```

pub mod client;
pub mod settings;
pub mod statement;

pub use client::{Client, Row, DEFAULT_REPLICA_PATH};
pub use settings::{
    ConnectionSettings, DEFAULT_SYNC_INTERVAL_SECS, LOCAL_DOCKER_URL, LOCAL_URL,
};
pub use statement::{SqlValue, Statement};
