pub mod check;
pub mod cms;
pub mod config;
pub mod query;
pub mod token;

use anyhow::Result;
use skiff::{ConnectionSettings, Environment};

/// Resolve connection settings from CLI overrides or the environment
pub(crate) fn resolve_settings(
    url: Option<String>,
    auth_token: Option<String>,
) -> Result<ConnectionSettings> {
    match url {
        Some(url) => {
            let mut settings = ConnectionSettings::new(url);
            settings.auth_token = auth_token;
            Ok(settings)
        }
        None => {
            let mut settings = ConnectionSettings::from_environment(&Environment::detect())?;
            if auth_token.is_some() {
                settings.auth_token = auth_token;
            }
            Ok(settings)
        }
    }
}
