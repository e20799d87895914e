//! Backend Registry - Config Class Name to File Store Factory
//!
//! The `class` key of `[StorageManager]` names the backend. Names are
//! resolved once at startup against an explicit table; older configs
//! that spell out a dotted class path resolve by their last segment.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::info;

use super::local::LocalFileStore;
use super::s3::S3FileStore;
use crate::adapters::object_store::InMemoryObjectStore;
use crate::config::{LocalSettings, MemorySettings, S3Settings, StorageManagerConfig};
use crate::error::{StorageError, StorageResult};
use crate::ports::file_store::FileStore;

/// Future returned by a backend factory.
pub type BackendFuture = BoxFuture<'static, StorageResult<Arc<dyn FileStore>>>;

/// Builds a file store from the `[StorageManager]` section.
pub type BackendFactory = fn(StorageManagerConfig) -> BackendFuture;

pub const S3_BACKEND: &str = "S3StorageManager";
pub const LOCAL_BACKEND: &str = "LocalStorageManager";
pub const MEMORY_BACKEND: &str = "MemoryStorageManager";

/// Table of named backend factories.
pub struct Registry {
    factories: HashMap<&'static str, BackendFactory>,
}

impl Registry {
    /// Registry with no backends.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, factory: BackendFactory) -> &mut Self {
        self.factories.insert(name, factory);
        self
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Look up the factory for a configured class name.
    pub fn resolve(&self, class: &str) -> StorageResult<BackendFactory> {
        self.factories
            .get(class_name(class))
            .copied()
            .ok_or_else(|| StorageError::UnknownBackend(class.to_string()))
    }

    /// Resolve `config.class` and build the backend.
    pub async fn build(&self, config: &StorageManagerConfig) -> StorageResult<Arc<dyn FileStore>> {
        let factory = self.resolve(&config.class)?;
        info!(class = %config.class, "Building storage backend");
        factory(config.clone()).await
    }
}

impl Default for Registry {
    /// Registry holding the S3, local and in-memory backends.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(S3_BACKEND, s3_backend)
            .register(LOCAL_BACKEND, local_backend)
            .register(MEMORY_BACKEND, memory_backend);
        registry
    }
}

/// Last segment of a dotted class path.
fn class_name(class: &str) -> &str {
    let class = class.trim();
    class.rsplit('.').next().unwrap_or(class)
}

fn s3_backend(config: StorageManagerConfig) -> BackendFuture {
    async move {
        let settings: S3Settings = config.settings()?;
        let store = S3FileStore::from_settings(&settings).await?;
        Ok(Arc::new(store) as Arc<dyn FileStore>)
    }
    .boxed()
}

fn local_backend(config: StorageManagerConfig) -> BackendFuture {
    async move {
        let settings: LocalSettings = config.settings()?;
        let store = LocalFileStore::from_settings(&settings).await?;
        Ok(Arc::new(store) as Arc<dyn FileStore>)
    }
    .boxed()
}

fn memory_backend(config: StorageManagerConfig) -> BackendFuture {
    async move {
        let settings: MemorySettings = config.settings()?;
        let objects = InMemoryObjectStore::with_bucket(&settings.bucket_name);
        let store = S3FileStore::connect(objects, &settings.bucket_name).await?;
        Ok(Arc::new(store) as Arc<dyn FileStore>)
    }
    .boxed()
}
