//! Command implementations for the CLI.

mod chart;
mod config;
mod history;
mod read;
mod seed;

pub use chart::{ChartArgs, cmd_chart};
pub use config::cmd_config;
pub use history::cmd_history;
pub use read::cmd_read;
pub use seed::cmd_seed;
