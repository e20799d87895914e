//! Local File Store - Documents as Files Under a Root Directory
//!
//! Keys become relative paths under the root. Each save writes its own
//! temporary file next to the target and renames it into place, so a
//! reader always sees a whole document and overlapping writers to one
//! key end last-writer-wins.

use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{info, instrument};

use crate::config::LocalSettings;
use crate::error::{StorageError, StorageResult};
use crate::ports::file_store::FileStore;

/// File store rooted at a local directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| io_error(&root, &e))?;

        info!(root = %root.display(), "Started local storage manager");

        Ok(Self { root })
    }

    pub async fn from_settings(settings: &LocalSettings) -> StorageResult<Self> {
        Self::new(&settings.path).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to a path, refusing keys that would leave the root.
    fn resolve(&self, key: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if key.is_empty() || escapes {
            return Err(StorageError::backend(format!("Invalid storage key: {key}")));
        }
        Ok(self.root.join(relative))
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> StorageError {
    let message = format!("{}: {err}", path.display());
    if err.kind() == ErrorKind::NotFound {
        StorageError::not_found(message)
    } else {
        StorageError::backend(message)
    }
}

/// Write `content` to a fresh temp file in `dir`, then rename it over `path`.
///
/// Failures here are never reported as not-found: the key is being written.
fn write_replace(dir: &Path, path: &Path, content: &[u8]) -> StorageResult<()> {
    let write_error = |at: &Path, err: &std::io::Error| {
        StorageError::backend(format!("{}: {err}", at.display()))
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| write_error(dir, &e))?;
    tmp.write_all(content)
        .map_err(|e| write_error(tmp.path(), &e))?;
    tmp.persist(path).map_err(|e| write_error(path, &e.error))?;

    Ok(())
}

#[async_trait]
impl FileStore for LocalFileStore {
    #[instrument(skip(self))]
    async fn load_file(&self, key: &str) -> StorageResult<String> {
        let path = self.resolve(key)?;
        fs::read_to_string(&path)
            .await
            .map_err(|e| io_error(&path, &e))
    }

    #[instrument(skip(self, content), fields(size = content.len()))]
    async fn save_file(&self, key: &str, content: &str) -> StorageResult<()> {
        let path = self.resolve(key)?;
        let dir = path
            .parent()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error(&dir, &e))?;

        let content = content.to_owned();
        tokio::task::spawn_blocking(move || write_replace(&dir, &path, content.as_bytes()))
            .await
            .map_err(|e| StorageError::backend(format!("Write task failed: {e}")))?
    }

    #[instrument(skip(self))]
    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_save_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path()).await.unwrap();

        store
            .save_file("Metric/bot/240119.jsonl", "{}\n")
            .await
            .unwrap();

        assert_eq!(store.root(), dir.path());
        assert!(store.root().join("Metric/bot/240119.jsonl").exists());
        assert_eq!(
            std::fs::read_dir(store.root().join("Metric/bot")).unwrap().count(),
            1
        );
        assert_eq!(
            store.load_file("Metric/bot/240119.jsonl").await.unwrap(),
            "{}\n"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_to_one_key_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalFileStore::new(dir.path()).await.unwrap());

        for round in 0..50 {
            let writers: Vec<_> = (0..8)
                .map(|writer| {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move {
                        let content = format!("{{\"round\":{round},\"writer\":{writer}}}");
                        store.save_file("BotStatus/b.json", &content).await
                    })
                })
                .collect();

            for handle in writers {
                handle.await.unwrap().unwrap();
            }

            let stored = store.load_file("BotStatus/b.json").await.unwrap();
            assert!(stored.starts_with(&format!("{{\"round\":{round},")), "{stored}");
        }

        let leftovers = std::fs::read_dir(dir.path().join("BotStatus")).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path()).await.unwrap();

        let err = store.load_file("BotStatus/none.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path()).await.unwrap();

        store.delete_file("BotStatus/none.json").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().join("data")).await.unwrap();

        assert!(store.save_file("../outside.json", "x").await.is_err());
        assert!(store.load_file("/etc/passwd").await.is_err());
        assert!(!dir.path().join("outside.json").exists());
    }
}
