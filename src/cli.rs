use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "court rush & price prediction backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the prediction server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print a weekly rush heatmap for a single court
    Forecast {
        /// Venue identifier
        #[arg(long)]
        venue: String,
        /// Court identifier
        #[arg(long)]
        court: String,
        /// Start of the week (RFC 3339), defaults to now
        #[arg(long)]
        start: Option<String>,
        /// Base price per hour
        #[arg(long)]
        base_price: Option<f64>,
        /// Court is outdoors
        #[arg(long, default_value_t = false)]
        outdoor: bool,
        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
