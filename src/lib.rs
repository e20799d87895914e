//! Elena Storage S3 — Library Root
//!
//! Persists bot status snapshots, data frames and metric logs as JSON
//! objects in an S3-compatible bucket, behind the same storage manager
//! the bot uses for local files.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ports;

pub use adapters::storage_manager::{LocalFileStore, S3FileStore, StorageManager};
pub use error::{StorageError, StorageResult};
