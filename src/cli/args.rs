use crate::services::ConfigPreset;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "data_processing")]
#[command(about = "A bounded producer/worker/collector data processing pipeline")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print the final report
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a batch of tasks and process it with a worker pool
    Run {
        /// Configuration preset
        #[arg(short = 'p', long, value_enum, default_value_t = ConfigPreset::Default)]
        preset: ConfigPreset,

        /// Number of workers (overrides the preset)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Number of tasks to generate (overrides the preset)
        #[arg(short, long)]
        tasks: Option<usize>,

        /// Bounded wait for each task publish, in milliseconds
        #[arg(long)]
        publish_timeout_ms: Option<u64>,

        /// Total wait for worker completion signals, in milliseconds
        #[arg(long)]
        signal_timeout_ms: Option<u64>,

        /// Task queue capacity (defaults to the task count)
        #[arg(long)]
        queue_capacity: Option<usize>,

        /// Minimum simulated processing delay, in milliseconds
        /// (default 500; overrides the zero delay of fast/stress)
        #[arg(long)]
        min_delay_ms: Option<u64>,

        /// Maximum simulated processing delay, in milliseconds
        /// (default 2000; overrides the zero delay of fast/stress)
        #[arg(long)]
        max_delay_ms: Option<u64>,

        /// Report output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with a non-zero status when collected != expected
        #[arg(long)]
        strict: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
