use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Deployment profile the process is running under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Development,
    Production,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Development => write!(f, "development"),
            Profile::Production => write!(f, "production"),
        }
    }
}

/// Deployment environment descriptor.
///
/// Detection reads `SKIFF_ENV` first, then falls back to `NODE_ENV` so the
/// toolkit drops into deployments that already export it. `DOCKER_ENV=true`
/// marks processes running inside a compose network, where the database is
/// reachable under its service hostname instead of localhost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub profile: Profile,
    pub docker: bool,
}

impl Environment {
    /// Detect the environment from process environment variables
    pub fn detect() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Detect the environment using the given variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile_str = lookup("SKIFF_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .unwrap_or_default();
        let profile = match profile_str.to_lowercase().as_str() {
            "development" | "dev" => Profile::Development,
            _ => Profile::Production,
        };
        let docker = lookup("DOCKER_ENV")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Environment { profile, docker }
    }

    pub fn development() -> Self {
        Environment {
            profile: Profile::Development,
            docker: false,
        }
    }

    pub fn production() -> Self {
        Environment {
            profile: Profile::Production,
            docker: false,
        }
    }

    pub fn is_development(&self) -> bool {
        self.profile == Profile::Development
    }
}

pub struct SkiffConfig {
    /// Path to the directory holding skiff's local data (replica files etc.)
    pub data_dir: String,

    /// Path to the Ed25519 private key used to mint local-auth tokens
    pub key_path: String,

    /// Validity period for minted tokens in days (default: 365)
    pub token_validity_days: u64,
}

const EMPTY_CONFIG: &str = r#"### skiff configuration file

### directory for local data used by skiff (embedded replica files)
# data_dir = "~/.skiff"

### Ed25519 private key used for local-auth token minting
# key_path = "./config/jwt-private-key.pem"

### validity period for minted tokens, in days
# token_validity_days = 365
"#;

/// Default location of the Ed25519 private key used for local auth.
pub const DEFAULT_KEY_PATH: &str = "./config/jwt-private-key.pem";

/// Default validity period for minted tokens, in days.
pub const DEFAULT_TOKEN_VALIDITY_DAYS: u64 = 365;

impl Default for SkiffConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.skiff", home_dir),
            key_path: DEFAULT_KEY_PATH.to_string(),
            token_validity_days: DEFAULT_TOKEN_VALIDITY_DAYS,
        }
    }
}

impl SkiffConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<SkiffConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.skiff/skiff.toml as the configuration file path
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        // Config dir
        let skiff_dir = format!("{}/.skiff", home_dir.as_str());

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(skiff_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create skiff directory: {}", e))?;
                let p = format!("{}/skiff.toml", skiff_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of SKIFF)
        // E.g., `SKIFF_DATA_DIR=~/.skiff ./skiff` would set the data directory
        builder = builder.add_source(config::Environment::with_prefix("SKIFF"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        // Parse data directory
        let data_dir = match config.get("data_dir") {
            Some(p) => {
                let path = Path::new(p);
                path.to_str()
                    .ok_or_else(|| anyhow!("Could not convert data_dir path to string"))?
                    .to_string()
            }
            None => {
                let dir = format!("{}/.skiff", home_dir.as_str());
                std::fs::create_dir_all(dir.as_str())
                    .map_err(|e| anyhow!("Unable to create data directory: {}", e))?;
                dir
            }
        };

        // Parse key path (default: ./config/jwt-private-key.pem)
        let key_path = config
            .get("key_path")
            .cloned()
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_string());

        // Parse token validity (default: 365 days)
        let token_validity_days = config
            .get("token_validity_days")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_VALIDITY_DAYS);

        Ok(SkiffConfig {
            data_dir,
            key_path,
            token_validity_days,
        })
    }

    /// Get the path used for embedded replica files
    pub fn replica_path(&self) -> String {
        let data_dir = self.data_dir.trim_end_matches('/');
        format!("{}/skiff-replica.db", data_dir)
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.skiff/skiff.toml", home_dir)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let key_status = if Path::new(&self.key_path).exists() {
            "exists"
        } else {
            "not found"
        };
        let lines = vec![
            format!("Data Directory:     {}", self.data_dir),
            format!("Replica Path:       {}", self.replica_path()),
            format!("Key Path:           {} ({})", self.key_path, key_status),
            format!("Token Validity:     {} days", self.token_validity_days),
        ];
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SkiffConfig::default();
        assert_eq!(config.key_path, "./config/jwt-private-key.pem");
        assert_eq!(config.token_validity_days, 365);
    }

    #[test]
    fn test_paths() {
        let config = SkiffConfig {
            data_dir: "/test/dir".to_string(),
            key_path: "/test/key.pem".to_string(),
            token_validity_days: 30,
        };

        assert_eq!(config.replica_path(), "/test/dir/skiff-replica.db");
    }

    #[test]
    fn test_environment_detect_development() {
        let env = Environment::from_lookup(|key| match key {
            "NODE_ENV" => Some("development".to_string()),
            _ => None,
        });
        assert_eq!(env.profile, Profile::Development);
        assert!(!env.docker);
        assert!(env.is_development());
    }

    #[test]
    fn test_environment_detect_docker() {
        let env = Environment::from_lookup(|key| match key {
            "NODE_ENV" => Some("development".to_string()),
            "DOCKER_ENV" => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(env.profile, Profile::Development);
        assert!(env.docker);
    }

    #[test]
    fn test_environment_skiff_env_wins() {
        let env = Environment::from_lookup(|key| match key {
            "SKIFF_ENV" => Some("production".to_string()),
            "NODE_ENV" => Some("development".to_string()),
            _ => None,
        });
        assert_eq!(env.profile, Profile::Production);
    }

    #[test]
    fn test_environment_defaults_to_production() {
        let env = Environment::from_lookup(|_| None);
        assert_eq!(env.profile, Profile::Production);
        assert!(!env.docker);
        assert!(!env.is_development());
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(format!("{}", Profile::Development), "development");
        assert_eq!(format!("{}", Profile::Production), "production");
    }
}
