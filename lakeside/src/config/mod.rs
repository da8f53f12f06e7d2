//! Configuration system for lakeside.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`LAKESIDE_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`)
//! 4. User config (`<data dir>/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use lakeside::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let settings = config.coordinator_settings();
//! println!("room locks wait up to {:?}", settings.lock_timeout);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, ReservationConfig};
pub use validator::ConfigValidator;
