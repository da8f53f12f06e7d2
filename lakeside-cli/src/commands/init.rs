//! Init command implementation.
//!
//! This module implements the `init` command for explicitly creating
//! the lakeside data directory, database and default configuration.

use crate::error::CliError;
use crate::utils::{database_path, resolve_data_dir, GlobalOptions};
use clap::Parser;
use lakeside::config::loader::USER_CONFIG_FILE;
use lakeside::{Config, DatabaseConfig, SqliteStore};
use std::path::Path;

/// Initialize lakeside data directory and database.
#[derive(Parser)]
#[command(about = "Initialize lakeside data directory and database")]
pub struct InitCommand {
    /// Overwrite an existing database
    #[arg(long)]
    overwrite: bool,

    /// Create a default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: --disable-autoinit is ignored here; creating the database is the point.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        let db_path = database_path(&data_dir);
        let config_path = data_dir.join(USER_CONFIG_FILE);

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!("Would initialize lakeside in: {}", data_dir.display());
            if db_path.exists() && !self.overwrite {
                println!(
                    "  - ERROR: Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                );
            } else {
                println!("  - Create database: {}", db_path.display());
            }
            if self.with_config && !config_path.exists() {
                println!("  - Create configuration: {}", config_path.display());
            }
            return Ok(());
        }

        if db_path.exists() {
            if !self.overwrite {
                return Err(CliError::InvalidArguments(format!(
                    "database already exists at {} (use --overwrite to replace it)",
                    db_path.display()
                )));
            }
            remove_database(&db_path)?;
        }

        std::fs::create_dir_all(&data_dir)?;
        SqliteStore::open(DatabaseConfig::new(&db_path).with_auto_create(true))?;

        if !global.quiet {
            println!("Initialized lakeside in {}", data_dir.display());
        }

        if self.with_config {
            if config_path.exists() {
                eprintln!(
                    "Keeping existing configuration at {}",
                    config_path.display()
                );
            } else {
                let yaml = serde_yaml::to_string(&Config::defaults())
                    .map_err(|e| CliError::Config(e.to_string()))?;
                std::fs::write(&config_path, yaml)?;
                if !global.quiet {
                    println!("Created configuration {}", config_path.display());
                }
            }
        }

        Ok(())
    }
}

/// Remove the database along with its WAL side files.
fn remove_database(db_path: &Path) -> Result<(), CliError> {
    std::fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut side = db_path.as_os_str().to_owned();
        side.push(suffix);
        let side = Path::new(&side);
        if side.exists() {
            std::fs::remove_file(side)?;
        }
    }
    Ok(())
}
