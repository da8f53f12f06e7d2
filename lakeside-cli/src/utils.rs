//! Utility functions for CLI operations.
//!
//! Configuration loading, opening the store and building the coordinator
//! are shared by every command that touches the database.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use lakeside::config::ReservationConfig;
use lakeside::database::{DatabaseConfig, DATABASE_FILE};
use lakeside::{
    Config, ConfigBuilder, RandomCodeGenerator, ReservationCoordinator, SqliteStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// A coordinator over one `SqliteStore`.
pub type Coordinator =
    ReservationCoordinator<Arc<SqliteStore>, Arc<SqliteStore>, RandomCodeGenerator>;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Extra configuration file layered above the user configuration.
    pub config_file: Option<PathBuf>,

    /// Override the database busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Override the per-room lock timeout (in milliseconds).
    pub lock_timeout_ms: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir`, then `LAKESIDE_DATA_DIR`, then `~/.lakeside`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => lakeside::database::resolve_data_dir()
            .map_err(|e| CliError::Config(format!("Could not determine data directory: {e}"))),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. `--config` file
/// 4. `<data dir>/config.yaml`
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_data_dir(resolve_data_dir(global)?);
    if let Some(ref path) = global.config_file {
        builder = builder.with_config_file(path);
    }

    let overrides = Config {
        reservations: global.lock_timeout_ms.map(|ms| ReservationConfig {
            lock_timeout_ms: Some(ms),
            ..Default::default()
        }),
        maximum_lock_wait_seconds: global.busy_timeout.map(u64::from),
        disable_autoinit: global.disable_autoinit.then_some(true),
        output_format: None,
    };

    builder
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Path of the database inside `data_dir`.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// Open the store with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_store(global: &GlobalOptions, config: &Config) -> Result<Arc<SqliteStore>, CliError> {
    let db_path = database_path(&resolve_data_dir(global)?);

    if !db_path.exists() && config.autoinit_disabled() {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(config.busy_timeout());
    Ok(Arc::new(SqliteStore::open(db_config)?))
}

/// Open the store and wrap it in a coordinator configured from `config`.
pub fn open_coordinator(global: &GlobalOptions, config: &Config) -> Result<Coordinator, CliError> {
    let store = open_store(global, config)?;
    Ok(ReservationCoordinator::new(
        Arc::clone(&store),
        store,
        RandomCodeGenerator,
        config.coordinator_settings(),
    ))
}

/// Parse a millisecond count into a `Duration`, rejecting zero.
pub fn parse_timeout_ms(ms: u64) -> Result<Duration, CliError> {
    if ms == 0 {
        return Err(CliError::InvalidArguments(
            "timeout must be greater than 0".to_string(),
        ));
    }
    Ok(Duration::from_millis(ms))
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
