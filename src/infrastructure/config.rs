use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_shutdown_grace() -> u64 {
  10
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub security: SecurityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Grace period for in-flight requests during shutdown
  #[serde(default = "default_shutdown_grace")]
  pub shutdown_grace_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Security configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  /// Process-wide HS256 signing secret, read-only after startup
  pub jwt_secret: String,
  /// Bearer token lifetime
  pub token_ttl_seconds: i64,
  /// Deadline applied to every usecase's storage calls
  pub operation_timeout_seconds: u64,
}

impl Config {
  /// Load configuration from files and environment variables.
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if present)
  /// 3. config/{RUN_MODE}.toml (if present)
  /// 4. Environment variables with the INKPRESS_ prefix, double
  ///    underscore separated: `INKPRESS_SERVER__PORT=8080`,
  ///    `INKPRESS_SECURITY__JWT_SECRET=...`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("INKPRESS")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
