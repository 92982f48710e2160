use anyhow::Result;
use clap::Subcommand;
use skiff::{CmsConfig, Environment};

#[derive(Subcommand)]
pub enum CmsCommands {
    /// Print the CMS configuration resolved from the environment
    Show {
        /// Compact JSON instead of pretty-printed
        #[clap(long)]
        compact: bool,
    },

    /// Validate the CMS configuration resolved from the environment
    Check,
}

pub fn run(commands: CmsCommands) -> Result<()> {
    let env = Environment::detect();
    let config = CmsConfig::from_env(&env);

    match commands {
        CmsCommands::Show { compact } => {
            if compact {
                println!("{}", serde_json::to_string(&config)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        CmsCommands::Check => {
            config.validate(&env)?;
            println!(
                "ok: {} collections, database {}",
                config.collections.len(),
                config.db.client.url
            );
        }
    }

    Ok(())
}
