//! S3 File Store - Documents as Objects in a Single Bucket
//!
//! Each document key maps one-to-one to an object key. Loads, saves
//! and deletes are a single object-store call each; the bucket is
//! checked once when the store is built and never again.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::adapters::object_store::AwsObjectStore;
use crate::config::S3Settings;
use crate::error::{StorageError, StorageResult};
use crate::ports::file_store::FileStore;
use crate::ports::object_store::ObjectStore;

/// File store persisting documents in an S3-compatible bucket.
///
/// Holds the client and bucket name for its whole lifetime; both are
/// fixed at construction.
pub struct S3FileStore<O = AwsObjectStore> {
    /// Object storage client.
    store: O,
    /// Bucket holding every document.
    bucket: String,
}

impl S3FileStore<AwsObjectStore> {
    /// Build an AWS client from settings and verify the bucket.
    pub async fn from_settings(settings: &S3Settings) -> StorageResult<Self> {
        let store = AwsObjectStore::connect(settings).await?;
        Self::connect(store, &settings.bucket_name).await
    }
}

impl<O: ObjectStore> S3FileStore<O> {
    /// Wrap `store`, failing if `bucket` is not among its buckets.
    ///
    /// No object is read or written before the check passes.
    #[instrument(skip(store))]
    pub async fn connect(store: O, bucket: &str) -> StorageResult<Self> {
        let buckets = store.list_buckets().await?;

        if !buckets.iter().any(|name| name == bucket) {
            return Err(StorageError::BucketNotFound {
                bucket: bucket.to_string(),
            });
        }

        info!(bucket = %bucket, "Started S3 storage manager");

        Ok(Self {
            store,
            bucket: bucket.to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl<O: ObjectStore> FileStore for S3FileStore<O> {
    async fn load_file(&self, key: &str) -> StorageResult<String> {
        let body = self.store.get_object(&self.bucket, key).await?;
        String::from_utf8(body)
            .map_err(|e| StorageError::backend(format!("Object {key} is not valid UTF-8: {e}")))
    }

    async fn save_file(&self, key: &str, content: &str) -> StorageResult<()> {
        self.store
            .put_object(&self.bucket, key, content.as_bytes().to_vec())
            .await
    }

    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        self.store.delete_object(&self.bucket, key).await
    }
}
