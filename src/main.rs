use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use mfrank::core::log::init_logging;

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

impl From<Commands> for mfrank::AppCommand {
    fn from(cmd: Commands) -> mfrank::AppCommand {
        match cmd {
            Commands::Rank => mfrank::AppCommand::Rank,
            Commands::Charts => mfrank::AppCommand::Charts,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Rank the fund catalog and export the top funds
    Rank,
    /// Render exploratory charts for the ranked catalog
    Charts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => mfrank::run_command(cmd.into(), cli.config_path.as_deref()),
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

    let path = mfrank::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
# Fund catalog to rank and where to write the ranked output.
input: "mutual_funds.csv"
output: "ranked_mutual_funds.csv"

# Number of top-ranked funds kept in the export.
top: 30

# Policy for funds missing a metric at scoring time: "fail" aborts the run,
# "exclude" drops the fund from the ranking and reports it.
missing_metrics: fail

# Uncomment to override the composite weights. All eight metrics are required
# and the weights must sum to 1.0.
# weights:
#   expense_ratio: 0.2
#   returns_1yr: 0.15
#   returns_3yr: 0.15
#   returns_5yr: 0.15
#   sharpe: 0.1
#   sortino: 0.1
#   alpha: 0.1
#   beta: 0.05
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
