use clap::Args;
use serde::Serialize;
use skiff::{ConnectionSettings, Environment, OutputFormat, SkiffConfig};
use std::path::Path;

/// Arguments for the Config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Output format: table, json, json-pretty
    #[clap(short, long, default_value = "table")]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    data_dir: String,
    environment: EnvironmentInfo,
    database: DatabaseInfo,
    key: KeyInfo,
    token_validity_days: u64,
}

#[derive(Debug, Serialize)]
struct EnvironmentInfo {
    profile: String,
    docker: bool,
}

#[derive(Debug, Serialize)]
struct DatabaseInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    auth_token_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sync_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct KeyInfo {
    path: String,
    exists: bool,
}

pub fn run(config: &SkiffConfig, args: ConfigArgs) -> anyhow::Result<()> {
    let ConfigArgs { output } = args;

    let env = Environment::detect();
    let database = match ConnectionSettings::from_environment(&env) {
        Ok(settings) => DatabaseInfo {
            url: Some(settings.url.clone()),
            auth_token_set: settings.auth_token.is_some(),
            sync_url: settings.sync_url.clone(),
            error: None,
        },
        Err(e) => DatabaseInfo {
            url: None,
            auth_token_set: false,
            sync_url: None,
            error: Some(e.to_string()),
        },
    };

    let config_info = ConfigInfo {
        config_file: SkiffConfig::config_file_path(),
        data_dir: config.data_dir.clone(),
        environment: EnvironmentInfo {
            profile: env.profile.to_string(),
            docker: env.docker,
        },
        database,
        key: KeyInfo {
            path: config.key_path.clone(),
            exists: Path::new(&config.key_path).exists(),
        },
        token_validity_days: config.token_validity_days,
    };

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string(&config_info)?),
        OutputFormat::JsonPretty => {
            println!("{}", serde_json::to_string_pretty(&config_info)?)
        }
        OutputFormat::Table => print_config_table(&config_info),
    }

    Ok(())
}

fn print_config_table(info: &ConfigInfo) {
    println!("Skiff Configuration");
    println!("===================\n");

    println!("General:");
    println!("  Config file:    {}", info.config_file);
    println!("  Data dir:       {}", info.data_dir);
    println!();

    println!("Environment:");
    println!("  Profile:        {}", info.environment.profile);
    println!("  Docker:         {}", if info.environment.docker { "yes" } else { "no" });
    println!();

    println!("Database:");
    match (&info.database.url, &info.database.error) {
        (Some(url), _) => {
            println!("  URL:            {}", url);
            println!(
                "  Auth token:     {}",
                if info.database.auth_token_set {
                    "set"
                } else {
                    "not set"
                }
            );
            if let Some(sync_url) = &info.database.sync_url {
                println!("  Sync URL:       {}", sync_url);
            }
        }
        (None, Some(error)) => {
            println!("  Status:         unresolved ({})", error);
        }
        (None, None) => {
            println!("  Status:         unresolved");
        }
    }
    println!();

    println!("Local Auth:");
    println!(
        "  Key:            {} ({})",
        info.key.path,
        if info.key.exists { "exists" } else { "not found" }
    );
    println!("  Token validity: {} days", info.token_validity_days);

    eprintln!();
    eprintln!("Tips:");
    eprintln!("  Use --output json for machine-readable output");
    eprintln!("  Edit ~/.skiff/skiff.toml to customize settings");
    eprintln!("  Set TURSO_DATABASE_URL and TURSO_AUTH_TOKEN for production databases");
}
