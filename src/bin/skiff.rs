use clap::{Parser, Subcommand};
use skiff::SkiffConfig;
use tracing::Level;

mod commands;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.skiff/skiff.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show resolved configuration and deployment environment
    Config(commands::config::ConfigArgs),

    /// Mint and inspect local-auth tokens
    Token {
        #[clap(subcommand)]
        commands: commands::token::TokenCommands,
    },

    /// Execute a SQL statement against the configured database
    Query(commands::query::QueryArgs),

    /// Check database connectivity
    Check(commands::check::CheckArgs),

    /// Generate and validate CMS wiring configuration
    Cms {
        #[clap(subcommand)]
        commands: commands::cms::CmsCommands,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
    }

    let config = match SkiffConfig::new(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Config(args) => commands::config::run(&config, args),
        Commands::Token { commands } => commands::token::run(&config, commands),
        Commands::Query(args) => commands::query::run(args).await,
        Commands::Check(args) => commands::check::run(args).await,
        Commands::Cms { commands } => commands::cms::run(commands),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
