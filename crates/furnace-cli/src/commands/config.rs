//! Config command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ConfigAction;
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, path: &Path, quiet: bool) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = Config::load_from(path);
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{}", content);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                if !quiet {
                    eprintln!(
                        "Config already exists at {}; use --force to overwrite it.",
                        path.display()
                    );
                }
                return Ok(());
            }
            Config::template().save_to(path)?;
            if !quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        cmd_config(ConfigAction::Init { force: false }, &path, true).unwrap();
        assert_eq!(Config::load_from(&path), Config::template());

        std::fs::write(&path, "no_color = true\n").unwrap();
        cmd_config(ConfigAction::Init { force: false }, &path, true).unwrap();
        assert!(Config::load_from(&path).no_color);

        cmd_config(ConfigAction::Init { force: true }, &path, true).unwrap();
        assert_eq!(Config::load_from(&path), Config::template());
    }
}
