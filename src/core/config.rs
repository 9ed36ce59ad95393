//! User configuration stored as TOML in the platform config directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::core::snippet::{SnippetOptions, DEFAULT_ALLOW, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    NoConfigDir,
    #[error("Failed to read config at {}: {source}", path_display(.path))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config at {}: {source}", path_display(.path))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to write config at {}: {source}", path_display(.path))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown config key: {0} (expected theme, width, height, or allow)")]
    UnknownKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// Frame width in pixels
    pub width: Option<u32>,
    /// Frame height in pixels
    pub height: Option<u32>,
    /// Value of the iframe `allow` attribute
    pub allow: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_from_path(&Self::default_path()?)
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            debug!(path = %path_display(config_path), "no config file, using defaults");
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        };
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(write_err)?;

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = NamedTempFile::new_in(parent).map_err(write_err)?;

        temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file
            .persist(config_path)
            .map_err(|err| write_err(err.error))?;
        debug!(path = %path_display(config_path), "saved config");
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs = ProjectDirs::from("org", "driveframe", "driveframe")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("dark")
    }

    pub fn snippet_options(&self) -> SnippetOptions {
        SnippetOptions {
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            height: self.height.unwrap_or(DEFAULT_HEIGHT),
            allow: self
                .allow
                .clone()
                .unwrap_or_else(|| DEFAULT_ALLOW.to_string()),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "theme" => match value.to_ascii_lowercase().as_str() {
                name @ ("dark" | "light") => self.theme = Some(name.to_string()),
                _ => return Err(invalid()),
            },
            "width" => self.width = Some(parse_dimension(value).ok_or_else(invalid)?),
            "height" => self.height = Some(parse_dimension(value).ok_or_else(invalid)?),
            "allow" => self.allow = Some(value.trim().to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        match key {
            "theme" => self.theme = None,
            "width" => self.width = None,
            "height" => self.height = None,
            "allow" => self.allow = None,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn print_all(&self) {
        let options = self.snippet_options();
        println!("Current configuration:");
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (default: dark)"),
        }
        print_setting("width", self.width.is_some(), options.width);
        print_setting("height", self.height.is_some(), options.height);
        print_setting("allow", self.allow.is_some(), &options.allow);
    }
}

fn print_setting(key: &str, is_set: bool, value: impl std::fmt::Display) {
    if is_set {
        println!("  {key}: {value}");
    } else {
        println!("  {key}: (default: {value})");
    }
}

fn parse_dimension(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            if let Ok(relative) = path.strip_prefix(PathBuf::from(home)) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config::load_from_path(&temp_dir.path().join("absent.toml"))
            .expect("Failed to load config");

        assert_eq!(config, Config::default());
        assert_eq!(config.snippet_options(), SnippetOptions::default());
        assert_eq!(config.theme_name(), "dark");
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("theme", "Light").unwrap();
        config.set("width", "800").unwrap();
        config.set("allow", " autoplay; fullscreen ").unwrap();
        config.save_to_path(&config_path).expect("Failed to save config");

        let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
        assert_eq!(loaded, config);
        assert_eq!(loaded.theme_name(), "light");

        let options = loaded.snippet_options();
        assert_eq!(options.width, 800);
        assert_eq!(options.height, DEFAULT_HEIGHT);
        assert_eq!(options.allow, "autoplay; fullscreen");
    }

    #[test]
    fn invalid_toml_reports_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "width = \"wide\"").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn set_rejects_bad_values_and_keys() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("width", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("height", "tall"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("theme", "solarized"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("colour", "red"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unset_restores_default() {
        let mut config = Config::default();
        config.set("height", "600").unwrap();
        config.unset("height").unwrap();
        assert_eq!(config.snippet_options().height, DEFAULT_HEIGHT);
        assert!(config.unset("nope").is_err());
    }
}
