//! Configuration Module - TOML-based Storage Configuration
//!
//! Loads the `[StorageManager]` section from `config.toml`. The `class`
//! key selects the backend; every other key in the section is kept as a
//! raw table and deserialized by the selected backend.

pub mod loader;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{StorageError, StorageResult};

/// Top-level configuration consumed by this crate.
///
/// Other sections of the bot's config file are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Storage backend selection and settings.
  #[serde(rename = "StorageManager")]
  pub storage_manager: StorageManagerConfig,
}

/// The `[StorageManager]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageManagerConfig {
  /// Registered backend name, optionally as a dotted class path.
  pub class: String,
  /// Backend-specific keys.
  #[serde(flatten)]
  pub settings: toml::Table,
}

impl StorageManagerConfig {
  /// Deserialize the backend-specific keys into `T`.
  pub fn settings<T: DeserializeOwned>(&self) -> StorageResult<T> {
    toml::Value::Table(self.settings.clone())
      .try_into()
      .map_err(|e: toml::de::Error| StorageError::InvalidSettings(e.message().to_string()))
  }
}

/// Settings for the S3 backend.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Settings {
  /// Access key; omit together with the secret to use the default chain.
  #[serde(default)]
  pub access_key_id: Option<String>,
  #[serde(default)]
  pub secret_access_key: Option<String>,
  /// AWS region, e.g. `eu-west-1`.
  pub region_name: String,
  /// Bucket holding every object of this deployment.
  pub bucket_name: String,
  /// Custom endpoint for S3-compatible services (MinIO, Ceph...).
  #[serde(default)]
  pub endpoint_url: Option<String>,
  /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
  #[serde(default)]
  pub force_path_style: bool,
}

/// Settings for the local filesystem backend.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalSettings {
  /// Root directory for stored documents.
  #[serde(default = "default_data_dir")]
  pub path: String,
}

/// Settings for the in-memory backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MemorySettings {
  #[serde(default = "default_memory_bucket")]
  pub bucket_name: String,
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_memory_bucket() -> String {
  "elena-memory".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  const S3_SECTION: &str = r#"
    [StorageManager]
    class = "S3StorageManager"
    access_key_id = "AKIDEXAMPLE"
    secret_access_key = "secret"
    region_name = "eu-west-1"
    bucket_name = "elena.dev"
  "#;

  #[test]
  fn test_s3_settings_from_section() {
    let config: AppConfig = toml::from_str(S3_SECTION).unwrap();
    assert_eq!(config.log_level, "info");
    assert_eq!(config.storage_manager.class, "S3StorageManager");

    let s3: S3Settings = config.storage_manager.settings().unwrap();
    assert_eq!(s3.bucket_name, "elena.dev");
    assert_eq!(s3.access_key_id.as_deref(), Some("AKIDEXAMPLE"));
    assert!(s3.endpoint_url.is_none());
    assert!(!s3.force_path_style);
  }

  #[test]
  fn test_missing_bucket_name_is_invalid() {
    let config: AppConfig = toml::from_str(
      r#"
      [StorageManager]
      class = "S3StorageManager"
      region_name = "eu-west-1"
      "#,
    )
    .unwrap();

    let result: StorageResult<S3Settings> = config.storage_manager.settings();
    assert!(matches!(result, Err(StorageError::InvalidSettings(_))));
  }

  #[test]
  fn test_local_settings_default_path() {
    let config: AppConfig =
      toml::from_str("[StorageManager]\nclass = \"LocalStorageManager\"\n").unwrap();
    let local: LocalSettings = config.storage_manager.settings().unwrap();
    assert_eq!(local.path, "data");
  }
}
