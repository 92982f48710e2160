#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Skiff - a libSQL/Turso client toolkit
//!
//! Skiff packages the plumbing around a remote SQLite-compatible database:
//! environment-aware connection settings, local-auth token minting, and
//! headless-CMS wiring. It can be used as both a command-line application
//! and a library. The heavy lifting stays in external libraries: the wire
//! protocol in the database client, signing in the JWT library, content
//! management in the CMS framework.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | (none) | Library core: connection, token, CMS, handler | `libsql`, `jsonwebtoken` |
//! | `cli` | Full CLI binary (default) | `clap`, `tabled`, `tokio` |
//!
//! ```toml
//! # Library only
//! skiff = { version = "0.1", default-features = false }
//!
//! # Default (CLI binary)
//! skiff = "0.1"
//! ```
//!
//! # Architecture
//!
//! - **[`connection`]**: connection settings, statements, and the client
//!   wrapper over the external database library
//! - **[`token`]**: EdDSA token minting for locally hosted servers
//! - **[`cms`]**: typed, validated CMS wiring configuration
//! - **[`handler`]**: Lambda-style row-fetch handler
//! - **[`config`]**: configuration file, environment detection
//!
//! # Quick Start Examples
//!
//! ## Environment-aware connection
//!
//! ```rust,ignore
//! use skiff::{Client, ConnectionSettings, Environment, Statement};
//!
//! let env = Environment::detect();
//! let client = Client::connect(&ConnectionSettings::from_environment(&env)?).await?;
//!
//! let rows = client
//!     .query(&Statement::new("SELECT * FROM posts WHERE published = ?").arg(1i64))
//!     .await?;
//! for row in &rows {
//!     println!("{}", serde_json::Value::Object(row.clone()));
//! }
//! ```
//!
//! ## Atomic batches
//!
//! ```rust,ignore
//! use skiff::Statement;
//!
//! client.batch(&[
//!     Statement::new("INSERT INTO posts (title, content) VALUES (?, ?)")
//!         .arg("Hello World")
//!         .arg("This is my first post"),
//!     Statement::new("UPDATE posts SET published = 1 WHERE title = ?").arg("Hello World"),
//! ]).await?;
//! ```
//!
//! ## Token minting
//!
//! ```rust,ignore
//! use skiff::TokenSigner;
//!
//! let signer = TokenSigner::from_pem_file("./config/jwt-private-key.pem")?;
//! let token = signer.sign("dev-user", chrono::Duration::days(365))?;
//! println!("{token}");
//! ```
//!
//! ## CMS wiring
//!
//! ```rust,ignore
//! use skiff::{CmsConfig, Environment};
//!
//! let env = Environment::detect();
//! let config = CmsConfig::from_env(&env);
//! config.validate(&env)?;
//! println!("{}", serde_json::to_string_pretty(&config)?);
//! ```

pub mod cms;
pub mod config;
pub mod connection;
pub mod handler;
pub mod output;
pub mod token;

// =============================================================================
// Configuration
// =============================================================================

pub use config::{Environment, Profile, SkiffConfig};

// =============================================================================
// Connection Module - Re-export commonly used types
// =============================================================================

pub use connection::{
    Client, ConnectionSettings, Row, SqlValue, Statement, DEFAULT_SYNC_INTERVAL_SECS,
    LOCAL_DOCKER_URL, LOCAL_URL,
};

// =============================================================================
// Token Module
// =============================================================================

pub use token::{decode_claims_unverified, token_expired, TokenClaims, TokenSigner, DEFAULT_SUBJECT};

// =============================================================================
// CMS Module
// =============================================================================

pub use cms::{
    default_collections, AdapterClient, AdapterSettings, AdminSettings, CmsConfig, Collection,
    Field, FieldType,
};

// =============================================================================
// Handler Module
// =============================================================================

pub use handler::{get_item, GatewayEvent, GatewayResponse};

// =============================================================================
// Output utilities
// =============================================================================

pub use output::OutputFormat;
