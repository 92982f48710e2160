use anyhow::Result;
use clap::Args;
use skiff::Client;
use std::time::Instant;

/// Arguments for the Check command
#[derive(Args)]
pub struct CheckArgs {
    /// Database URL, overriding the environment
    #[clap(long)]
    pub url: Option<String>,

    /// Auth token, overriding the environment
    #[clap(long)]
    pub auth_token: Option<String>,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let settings = super::resolve_settings(args.url, args.auth_token)?;

    let started = Instant::now();
    let client = Client::connect(&settings).await?;
    client.ping().await?;
    let elapsed = started.elapsed();

    println!("ok: {} ({} ms)", settings.summary(), elapsed.as_millis());
    Ok(())
}
