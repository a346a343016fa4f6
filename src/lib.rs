pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod features;
pub mod model;
pub mod pricing;
pub mod rush;
pub mod services;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::api::models::HeatmapRequest;
use crate::api::parsers::timestamps::parse_timestamp;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::forecast::ForecastService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_forecast(
    venue: &str,
    court: &str,
    start: Option<&str>,
    base_price: Option<f64>,
    outdoor: bool,
    as_json: bool,
) -> Result<()> {
    let week_start = start
        .map(|raw| parse_timestamp(raw).with_context(|| format!("Unreadable --start timestamp {raw:?}")))
        .transpose()?;
    let request = HeatmapRequest {
        venue_id: Some(venue.to_string()),
        court_id: Some(court.to_string()),
        week_start,
        base_price,
        outdoor: Some(outdoor),
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ForecastService::new(AppConfig::from_env());
        service.run(&request, as_json).await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
