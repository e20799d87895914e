//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating the storage section,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
  let path = path.as_ref();

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    class = %config.storage_manager.class,
    keys = config.storage_manager.settings.len(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate the storage section.
///
/// Backend-specific keys are checked by the backend when it is built.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.storage_manager.class.trim().is_empty(),
    "StorageManager.class must not be empty"
  );

  if let Some(bucket) = config.storage_manager.settings.get("bucket_name") {
    anyhow::ensure!(
      bucket.as_str().is_some_and(|b| !b.is_empty()),
      "StorageManager.bucket_name must be a non-empty string"
    );
  }

  Ok(())
}
