//! Assembling the effective configuration.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from defaults, files, the environment and overrides.
///
/// # Examples
///
/// ```
/// use lakeside::config::{Config, ConfigBuilder, OutputFormat};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         output_format: Some(OutputFormat::Json),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.output_format, Some(OutputFormat::Json));
/// assert_eq!(config.maximum_lock_wait_seconds, Some(5));
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads files and the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the user configuration from `dir` instead of the default data directory.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Layers an explicit configuration file above the user configuration.
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Ignores configuration files.
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `LAKESIDE_*` environment variables.
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` on top of everything else.
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merges every source and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an environment variable
    /// cannot be parsed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::defaults();

        if !self.skip_files {
            let sources =
                ConfigLoader::load_all(self.data_dir.as_deref(), self.config_file.as_deref())?;
            ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
