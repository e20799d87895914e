//! File Store Port - The Four Storage Primitives
//!
//! A file store turns `(identifier, type name)` into a key and moves
//! whole UTF-8 documents in and out of that key. JSON encoding, append
//! logs and error context live one layer up, in the storage manager.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageResult;

/// A domain type persisted as one JSON document.
///
/// `TYPE_NAME` is the first key segment and must not contain `/`.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
  const TYPE_NAME: &'static str;
}

/// Build the document key for a record: `{type_name}/{data_id}.json`.
pub fn document_key(data_id: &str, type_name: &str) -> String {
  format!("{type_name}/{data_id}.json")
}

/// Trait for storage backends addressed by path-like keys.
///
/// Implementations hold no mutable state after construction and may be
/// shared across tasks behind an `Arc`.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
  /// Key for the document holding `data_id` of type `type_name`.
  fn file_path(&self, data_id: &str, type_name: &str) -> String {
    document_key(data_id, type_name)
  }

  /// Read the whole document at `key` as UTF-8 text.
  async fn load_file(&self, key: &str) -> StorageResult<String>;

  /// Replace the document at `key` with `content`.
  async fn save_file(&self, key: &str, content: &str) -> StorageResult<()>;

  /// Remove the document at `key`. Removing a missing key succeeds.
  async fn delete_file(&self, key: &str) -> StorageResult<()>;
}
