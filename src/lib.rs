pub mod cli;
pub mod config;
pub mod core;
pub mod store;

use crate::core::pipeline;
use crate::store::{CsvFundStore, FundSink, FundSource};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    /// Score and rank the fund catalog, export the top funds and display them.
    Rank,
    /// Score and rank the fund catalog, then render the exploratory charts.
    Charts,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fund ranker starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let weights = config.weights()?;
    let store = CsvFundStore::new(&config.input, &config.output);

    let raw = store.load()?;
    let ranked = pipeline::run(raw, &weights, config.missing_metrics)?;

    match command {
        AppCommand::Rank => {
            store.export(&ranked, config.top)?;
            cli::rank::run(&ranked, config.top)
        }
        AppCommand::Charts => cli::charts::run(&ranked),
    }
}
