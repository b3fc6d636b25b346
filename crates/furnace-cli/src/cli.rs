//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use furnace_core::SourceKind;

/// Output format for tabular commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Output format for the chart command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ChartFormat {
    /// Drawable primitives as JSON
    #[default]
    Json,
    /// Standalone SVG image
    Svg,
}

#[derive(Parser)]
#[command(name = "furnace")]
#[command(author, version, about = "Furnace temperature monitor", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "FURNACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the readings file (overrides config)
    #[arg(long, global = true, env = "FURNACE_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Take one temperature reading and store it in the current hour
    Read {
        /// Temperature source (mock or http)
        #[arg(short, long, env = "FURNACE_SOURCE")]
        source: Option<SourceKind>,

        /// Sensor base URL for the http source
        #[arg(short, long, env = "FURNACE_URL")]
        url: Option<String>,

        /// Simulated latency in milliseconds for the mock source
        #[arg(long)]
        latency_ms: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print all stored readings, oldest first
    History {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Omit header row in CSV output (useful for appending)
        #[arg(long)]
        no_header: bool,
    },

    /// Project stored readings into a chart
    Chart {
        /// Canvas width in pixels
        #[arg(long)]
        width: Option<f32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<f32>,

        /// Zoom factor applied to the default viewport
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Horizontal pan in pixels (negative scrolls forward in time)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        pan_x: f32,

        /// Vertical pan in pixels
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        pan_y: f32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ChartFormat,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize the readings file from bundled sample data
    Seed {
        /// Overwrite an existing readings file
        #[arg(long)]
        force: bool,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the configuration file path
    Path,

    /// Show current configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
