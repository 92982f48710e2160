//! Connection settings and environment-aware factories
//!
//! [`ConnectionSettings`] is a plain value object passed to the external
//! client factory. The constructors here cover the deployment shapes skiff
//! supports: a locally hosted server (optionally behind Docker or JWT auth),
//! Turso Cloud, and serverless deployments syncing an embedded replica.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::config::Environment;

/// Local development server URL.
pub const LOCAL_URL: &str = "http://localhost:8080";

/// Local server URL when running inside a compose network.
pub const LOCAL_DOCKER_URL: &str = "http://libsql:8080";

/// Default sync interval for embedded replicas, in seconds.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;

const ENV_TURSO_DATABASE_URL: &str = "TURSO_DATABASE_URL";
const ENV_TURSO_AUTH_TOKEN: &str = "TURSO_AUTH_TOKEN";
const ENV_LIBSQL_JWT_TOKEN: &str = "LIBSQL_JWT_TOKEN";

/// Connection settings forwarded to the external client factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Database URL (`http(s)://`, `libsql://`, `file:` or a local path)
    pub url: String,

    /// Bearer token for the database endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Remote URL to sync an embedded replica from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_url: Option<String>,

    /// Periodic sync interval in seconds, interpreted by the client library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_interval_secs: Option<u64>,

    /// Local file backing the embedded replica
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_path: Option<String>,
}

/// How [`ConnectionSettings`] map onto the external client's constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConnectionMode {
    /// Local file or in-memory database
    Local(String),
    /// Remote server over HTTP(S)
    Remote,
    /// Embedded replica syncing from a remote server
    Replica,
}

impl ConnectionSettings {
    /// Settings for a plain URL, no auth
    pub fn new(url: impl Into<String>) -> Self {
        ConnectionSettings {
            url: url.into(),
            auth_token: None,
            sync_url: None,
            sync_interval_secs: None,
            replica_path: None,
        }
    }

    /// Set the bearer token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Local development server, no auth
    pub fn local() -> Self {
        Self::new(LOCAL_URL)
    }

    /// Local server reachable under its compose service hostname
    pub fn local_docker() -> Self {
        Self::new(LOCAL_DOCKER_URL)
    }

    /// Local development server with JWT auth
    ///
    /// The token comes from `LIBSQL_JWT_TOKEN` and is optional: a local
    /// server without auth configured ignores it.
    pub fn local_with_auth() -> Self {
        Self::local_with_auth_from(&env_var)
    }

    fn local_with_auth_from<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::local();
        settings.auth_token = lookup(ENV_LIBSQL_JWT_TOKEN);
        settings
    }

    /// Production Turso Cloud settings from the environment
    ///
    /// Requires `TURSO_DATABASE_URL` and `TURSO_AUTH_TOKEN`.
    pub fn turso_from_env() -> Result<Self> {
        Self::turso_from(&env_var)
    }

    fn turso_from<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_TURSO_DATABASE_URL)
            .ok_or_else(|| anyhow!("{} is not set", ENV_TURSO_DATABASE_URL))?;
        let token = lookup(ENV_TURSO_AUTH_TOKEN)
            .ok_or_else(|| anyhow!("{} is not set", ENV_TURSO_AUTH_TOKEN))?;
        Ok(Self::new(url).auth_token(token))
    }

    /// Environment-aware factory
    ///
    /// Development resolves to the local server (Docker-aware, with the
    /// optional local JWT); production requires the Turso Cloud pair.
    pub fn from_environment(env: &Environment) -> Result<Self> {
        Self::from_environment_with(env, &env_var)
    }

    fn from_environment_with<F>(env: &Environment, lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if env.is_development() {
            let mut settings = if env.docker {
                Self::local_docker()
            } else {
                Self::local()
            };
            settings.auth_token = lookup(ENV_LIBSQL_JWT_TOKEN);
            return Ok(settings);
        }

        Self::turso_from(lookup)
    }

    /// Serverless settings: Turso Cloud plus an embedded replica synced
    /// every [`DEFAULT_SYNC_INTERVAL_SECS`] seconds
    pub fn serverless_from_env(replica_path: impl Into<String>) -> Result<Self> {
        Self::serverless_from(&env_var, replica_path)
    }

    fn serverless_from<F>(lookup: &F, replica_path: impl Into<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::turso_from(lookup)?;
        settings.sync_url = Some(settings.url.clone());
        settings.sync_interval_secs = Some(DEFAULT_SYNC_INTERVAL_SECS);
        settings.replica_path = Some(replica_path.into());
        Ok(settings)
    }

    /// Validate the settings before any network call
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(anyhow!("database URL must not be empty"));
        }
        if !is_supported_url(&self.url) {
            return Err(anyhow!(
                "unsupported database URL '{}': expected http(s)://, libsql://, file: or a local path",
                self.url
            ));
        }
        if self.sync_interval_secs.is_some() && self.sync_url.is_none() {
            return Err(anyhow!("sync_interval_secs requires a sync_url"));
        }
        if let Some(sync_url) = &self.sync_url {
            if !is_remote_url(sync_url) {
                return Err(anyhow!(
                    "sync_url '{}' must be a remote http(s):// or libsql:// URL",
                    sync_url
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn mode(&self) -> ConnectionMode {
        if self.sync_url.is_some() {
            return ConnectionMode::Replica;
        }
        if is_remote_url(&self.url) {
            return ConnectionMode::Remote;
        }
        let path = self
            .url
            .strip_prefix("file:")
            .unwrap_or(self.url.as_str())
            .to_string();
        ConnectionMode::Local(path)
    }

    /// One-line summary with the token redacted
    pub fn summary(&self) -> String {
        let auth = if self.auth_token.is_some() {
            "token set"
        } else {
            "no auth"
        };
        match &self.sync_url {
            Some(sync_url) => format!(
                "{} ({}, replica of {} every {}s)",
                self.url,
                auth,
                sync_url,
                self.sync_interval_secs
                    .unwrap_or(DEFAULT_SYNC_INTERVAL_SECS)
            ),
            None => format!("{} ({})", self.url, auth),
        }
    }
}

fn is_remote_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("libsql://")
}

fn is_supported_url(url: &str) -> bool {
    is_remote_url(url) || url == ":memory:" || !url.contains("://")
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_local_settings() {
        let settings = ConnectionSettings::local();
        assert_eq!(settings.url, "http://localhost:8080");
        assert!(settings.auth_token.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_local_docker_settings() {
        let settings = ConnectionSettings::local_docker();
        assert_eq!(settings.url, "http://libsql:8080");
    }

    #[test]
    fn test_local_with_auth() {
        let settings = ConnectionSettings::local_with_auth_from(&|key| match key {
            "LIBSQL_JWT_TOKEN" => Some("local-token".to_string()),
            _ => None,
        });
        assert_eq!(settings.auth_token.as_deref(), Some("local-token"));

        // token stays optional for unauthenticated local servers
        let settings = ConnectionSettings::local_with_auth_from(&no_env);
        assert!(settings.auth_token.is_none());
    }

    #[test]
    fn test_turso_requires_both_vars() {
        let result = ConnectionSettings::turso_from(&|key| match key {
            "TURSO_DATABASE_URL" => Some("libsql://demo.turso.io".to_string()),
            _ => None,
        });
        assert!(result.is_err());

        let settings = ConnectionSettings::turso_from(&|key| match key {
            "TURSO_DATABASE_URL" => Some("libsql://demo.turso.io".to_string()),
            "TURSO_AUTH_TOKEN" => Some("cloud-token".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.url, "libsql://demo.turso.io");
        assert_eq!(settings.auth_token.as_deref(), Some("cloud-token"));
    }

    #[test]
    fn test_from_environment_development() {
        let env = Environment::development();
        let settings = ConnectionSettings::from_environment_with(&env, &no_env).unwrap();
        assert_eq!(settings.url, "http://localhost:8080");
    }

    #[test]
    fn test_from_environment_docker() {
        let mut env = Environment::development();
        env.docker = true;
        let settings = ConnectionSettings::from_environment_with(&env, &no_env).unwrap();
        assert_eq!(settings.url, "http://libsql:8080");
    }

    #[test]
    fn test_from_environment_production() {
        let env = Environment::production();
        assert!(ConnectionSettings::from_environment_with(&env, &no_env).is_err());

        let settings = ConnectionSettings::from_environment_with(&env, &|key| match key {
            "TURSO_DATABASE_URL" => Some("libsql://demo.turso.io".to_string()),
            "TURSO_AUTH_TOKEN" => Some("cloud-token".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.url, "libsql://demo.turso.io");
    }

    #[test]
    fn test_serverless_settings() {
        let settings = ConnectionSettings::serverless_from(
            &|key| match key {
                "TURSO_DATABASE_URL" => Some("libsql://demo.turso.io".to_string()),
                "TURSO_AUTH_TOKEN" => Some("cloud-token".to_string()),
                _ => None,
            },
            "/tmp/replica.db",
        )
        .unwrap();
        assert_eq!(settings.sync_url.as_deref(), Some("libsql://demo.turso.io"));
        assert_eq!(settings.sync_interval_secs, Some(60));
        assert_eq!(settings.replica_path.as_deref(), Some("/tmp/replica.db"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        assert!(ConnectionSettings::new("").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_scheme() {
        assert!(ConnectionSettings::new("ftp://example.com")
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_interval_without_sync_url() {
        let mut settings = ConnectionSettings::local();
        settings.sync_interval_secs = Some(60);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_mode_detection() {
        assert_eq!(
            ConnectionSettings::local().mode(),
            ConnectionMode::Remote
        );
        assert_eq!(
            ConnectionSettings::new(":memory:").mode(),
            ConnectionMode::Local(":memory:".to_string())
        );
        assert_eq!(
            ConnectionSettings::new("file:data/local.db").mode(),
            ConnectionMode::Local("data/local.db".to_string())
        );

        let mut replica = ConnectionSettings::new("libsql://demo.turso.io");
        replica.sync_url = Some("libsql://demo.turso.io".to_string());
        assert_eq!(replica.mode(), ConnectionMode::Replica);
    }

    #[test]
    fn test_summary_redacts_token() {
        let settings = ConnectionSettings::local().auth_token("secret-token");
        let summary = settings.summary();
        assert!(!summary.contains("secret-token"));
        assert!(summary.contains("token set"));
    }
}
