use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Interactive launch records dashboard
#[derive(Parser, Debug)]
#[command(name = "launch-dashboard", version, about, long_about = None)]
pub struct Cli {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(value_name = "DATA", default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Initial lower end of the payload range in kg (defaults to the dataset minimum)
    #[arg(long, value_name = "KG")]
    pub range_low: Option<f64>,

    /// Initial upper end of the payload range in kg (defaults to the dataset maximum)
    #[arg(long, value_name = "KG")]
    pub range_high: Option<f64>,

    /// Payload slider step in kg; 0 disables snapping
    #[arg(long, value_name = "KG", default_value = "1000")]
    pub payload_step: f64,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Caller-supplied initial payload sub-range; a `None` end uses the dataset bound.
    pub initial_range: (Option<f64>, Option<f64>),
    pub payload_step: f64,
    pub log_level: LevelFilter,
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        let log_level = match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        DashboardConfig {
            data_path: cli.data,
            initial_range: (cli.range_low, cli.range_high),
            payload_step: cli.payload_step.max(0.0),
            log_level,
        }
    }
}
