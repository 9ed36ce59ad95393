//! `config`, `set` and `unset`.

use std::error::Error;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::config::{path_display, Config, ConfigError};

fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::default_path(),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    Config::load_from_path(&resolve_path(path)?)
}

pub fn run_show(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let path = resolve_path(path)?;
    let config = Config::load_from_path(&path)?;
    println!("Config file: {}", path_display(&path));
    config.print_all();
    Ok(())
}

pub fn run_set(path: Option<&Path>, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let path = resolve_path(path)?;
    let mut config = Config::load_from_path(&path)?;
    config.set(key, value)?;
    config.save_to_path(&path)?;
    info!(key, value, "config updated");
    println!("✅ Set {key} to: {}", value.trim());
    Ok(())
}

pub fn run_unset(path: Option<&Path>, key: &str) -> Result<(), Box<dyn Error>> {
    let path = resolve_path(path)?;
    let mut config = Config::load_from_path(&path)?;
    config.unset(key)?;
    config.save_to_path(&path)?;
    info!(key, "config value reset");
    println!("✅ Unset {key}");
    Ok(())
}
