//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the user configuration file inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use lakeside::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Some(Path::new("/var/lib/lakeside")), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every configuration file that applies, lowest precedence first.
    ///
    /// 1. `<data_dir>/config.yaml`, if present (precedence 1). Without a
    ///    `data_dir` the default data directory is used.
    /// 2. `explicit`, which must exist (precedence 2).
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed, or if
    /// `explicit` is missing.
    pub fn load_all(data_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        if let Some(path) = explicit {
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                precedence: 2,
                config: Self::load_file(path)?,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => crate::database::resolve_data_dir()?.join(USER_CONFIG_FILE),
        };

        if !config_path.exists() {
            log::debug!("no user configuration at {}", config_path.display());
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Loads and parses a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("failed to read configuration file: {e}"),
        })?;

        log::debug!("loading configuration from {}", path.display());
        Config::from_yaml(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("invalid YAML: {e}"),
        })
    }
}
