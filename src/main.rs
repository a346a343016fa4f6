use anyhow::Result;

use court_rush_pricing::cli::Command;
use court_rush_pricing::{handle_completions, handle_forecast, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Forecast {
            venue,
            court,
            start,
            base_price,
            outdoor,
            json,
        } => handle_forecast(venue, court, start.as_deref(), *base_price, *outdoor, *json),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
