use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Subcommand;
use serde::Serialize;
use skiff::{decode_claims_unverified, OutputFormat, SkiffConfig, TokenSigner, DEFAULT_SUBJECT};

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Mint a signed token from the configured Ed25519 private key
    Generate {
        /// Path to the private key PEM file, overriding the configuration
        #[clap(short, long)]
        key: Option<String>,

        /// Subject claim
        #[clap(short, long, default_value = DEFAULT_SUBJECT)]
        subject: String,

        /// Validity period in days, overriding the configuration
        #[clap(short, long)]
        expires_in_days: Option<i64>,
    },

    /// Decode a token's claims without verifying its signature
    Inspect {
        /// The token to inspect
        token: String,

        /// Output format: table, json, json-pretty
        #[clap(short, long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Debug, Serialize)]
struct ClaimsInfo {
    sub: String,
    issued_at: String,
    expires_at: String,
    expired: bool,
}

pub fn run(config: &SkiffConfig, commands: TokenCommands) -> Result<()> {
    match commands {
        TokenCommands::Generate {
            key,
            subject,
            expires_in_days,
        } => {
            let key_path = key.unwrap_or_else(|| config.key_path.clone());
            let days = expires_in_days.unwrap_or(config.token_validity_days as i64);

            let signer = TokenSigner::from_pem_file(&key_path)?;
            let token = signer.sign(&subject, Duration::days(days))?;
            println!("{token}");

            eprintln!();
            eprintln!("Tips:");
            eprintln!("  This token is valid for {days} days");
            eprintln!("  Pass it to the database server via LIBSQL_JWT_TOKEN");
        }
        TokenCommands::Inspect { token, output } => {
            let claims = decode_claims_unverified(&token)?;
            let info = ClaimsInfo {
                sub: claims.sub.clone(),
                issued_at: format_timestamp(claims.iat),
                expires_at: format_timestamp(claims.exp),
                expired: claims.exp < Utc::now().timestamp(),
            };

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string(&info)?),
                OutputFormat::JsonPretty => {
                    println!("{}", serde_json::to_string_pretty(&info)?)
                }
                OutputFormat::Table => {
                    println!("Subject:    {}", info.sub);
                    println!("Issued at:  {}", info.issued_at);
                    println!("Expires at: {}", info.expires_at);
                    println!("Expired:    {}", if info.expired { "yes" } else { "no" });
                }
            }
        }
    }

    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}
