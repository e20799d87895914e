//! Object Store Port - Bucket/Key Object CRUD
//!
//! The minimal slice of an S3-compatible API the S3 file store needs:
//! one bucket listing at startup, then get/put/delete per key.

use async_trait::async_trait;

use crate::error::StorageResult;

/// Trait for S3-compatible object storage clients.
///
/// Errors carry the service's own message; a missing key is reported
/// with `StorageError::not_found`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
  /// Names of all buckets visible to the current credentials.
  async fn list_buckets(&self) -> StorageResult<Vec<String>>;

  /// Fetch the full body of an object.
  async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

  /// Upload `body`, overwriting any existing object at `key`.
  async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> StorageResult<()>;

  /// Delete an object. S3 treats a missing key as success.
  async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()>;
}

/// Render a service error the way the bot has always logged them.
pub fn service_error_message(operation: &str, code: &str, message: &str) -> String {
  format!("An error occurred ({code}) when calling the {operation} operation: {message}")
}
