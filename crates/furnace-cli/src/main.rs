//! Command-line interface for the furnace temperature monitor.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `read` | Take one reading and store it in the current hour |
//! | `history` | Print stored readings |
//! | `chart` | Project stored readings into a chart (JSON or SVG) |
//! | `seed` | Initialize the readings file from bundled data |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Environment Variables
//!
//! - `FURNACE_SOURCE`: Temperature source, `mock` or `http` (overridden by `--source`)
//! - `FURNACE_URL`: Sensor base URL (overridden by `--url`)
//! - `FURNACE_STORE`: Readings file (overridden by `--store`)
//! - `FURNACE_CONFIG`: Configuration file (overridden by `--config`)
//! - `NO_COLOR`: Disable colored output when set

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use furnace_chart::ChartLayout;
use furnace_core::{MockSensor, build_source};
use furnace_store::ReadingStore;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod svg;
mod util;

use cli::{Cli, Commands};
use commands::ChartArgs;
use config::{Config, resolve_latency_ms, resolve_source, resolve_store_path, resolve_url};
use format::FormatOptions;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "furnace", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::path);
    let config = Config::load_from(&config_path);
    let opts = FormatOptions::new(cli.no_color || config.no_color);

    if let Commands::Config { action } = cli.command {
        return commands::cmd_config(action, &config_path, cli.quiet);
    }

    let store = ReadingStore::open(resolve_store_path(cli.store.clone(), &config));

    let result = match cli.command {
        Commands::Read {
            source,
            url,
            latency_ms,
            format,
        } => {
            let kind = resolve_source(source, &config);
            let mock = MockSensor::new()
                .with_latency(Duration::from_millis(resolve_latency_ms(latency_ms, &config)));
            let source = build_source(kind, &resolve_url(url, &config), mock)?;
            commands::cmd_read(&store, source.as_ref(), format, &opts).await
        }
        Commands::History { format, no_header } => {
            commands::cmd_history(&store, format, &opts.with_no_header(no_header))
        }
        Commands::Chart {
            width,
            height,
            scale,
            pan_x,
            pan_y,
            format,
            output,
        } => {
            let defaults = ChartLayout::default();
            let args = ChartArgs {
                width: width.or(config.chart.width).unwrap_or(defaults.canvas_width),
                height: height.or(config.chart.height).unwrap_or(defaults.canvas_height),
                scale,
                pan_x,
                pan_y,
                format,
                output: output.as_ref(),
            };
            commands::cmd_chart(&store, args, &opts)
        }
        Commands::Seed { force } => commands::cmd_seed(&store, force, cli.quiet),
        Commands::Config { .. } | Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    };

    util::report_store_diagnostics(&store, cli.quiet);
    result
}
