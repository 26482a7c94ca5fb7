use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aemet-audit")]
#[command(about = "Coverage audit and summaries for AEMET forecast and station datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Settings file (toml, yaml or json)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that every reference municipality has a forecast
    Coverage {
        #[arg(
            long,
            help = "Reference municipalities CSV [default: data/input/municipalities.csv.gz]"
        )]
        reference: Option<PathBuf>,

        #[arg(
            long,
            help = "Municipal forecast CSV [default: data/output/daily_municipal_forecast.csv.gz]"
        )]
        forecast: Option<PathBuf>,
    },

    /// Summarise the Barcelona station and forecast datasets
    Summarize {
        #[arg(long, help = "Historical daily station CSV")]
        daily_historical: Option<PathBuf>,

        #[arg(long, help = "Hourly station CSV")]
        hourly: Option<PathBuf>,

        #[arg(long, help = "Current daily station CSV")]
        daily_current: Option<PathBuf>,

        #[arg(long, help = "Barcelona municipal forecast CSV")]
        forecast: Option<PathBuf>,

        #[arg(long, help = "Number of most recent days to list [default: 7]")]
        last_days: Option<usize>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Show a progress spinner on stderr")]
        progress: bool,
    },
}
