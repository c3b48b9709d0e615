use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tallyfx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tallyfx::AppCommand {
    fn from(cmd: Commands) -> tallyfx::AppCommand {
        match cmd {
            Commands::Summary => tallyfx::AppCommand::Summary,
            Commands::Breakdown => tallyfx::AppCommand::Breakdown,
            Commands::Rates { refresh } => tallyfx::AppCommand::Rates { refresh },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display per-currency and normalized expense totals
    Summary,
    /// Display the month and category breakdown
    Breakdown,
    /// Display the cached exchange rates
    Rates {
        /// Drop the cached snapshot and fetch a fresh one
        #[arg(long)]
        refresh: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => tallyfx::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = tallyfx::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
owner: "me"
pivot_currency: "USD"
records_path: "records.yaml"

# provider:
#   base_url: "https://api.currencyapi.com"
#   api_key: "your-api-key"

# Skip the provider entirely and use cached or built-in rates:
offline: true
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
