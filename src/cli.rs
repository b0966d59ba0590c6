use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orchardcare", version, about = "Fruit tree and berry care scheduler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and print each plant's schedule
    Check {
        /// Print sensor states as JSON
        #[arg(long)]
        json: bool,
    },
    /// List care events between two dates
    Events {
        /// First day, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day, YYYY-MM-DD (default: 30 days after --from)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Only this plant, by key (e.g. apple, citrus_lemon)
        #[arg(long)]
        plant: Option<String>,
    },
    /// Run refresh and reminder timers without the TUI
    Watch,
}
