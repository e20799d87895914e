//! Storage Manager Adapters - File Stores and the Typed Facade
//!
//! Implements the `FileStore` port for S3 buckets and local
//! directories, and layers JSON records and JSONL metric logs on
//! top of any of them.

pub mod local;
pub mod manager;
pub mod registry;
pub mod s3;

pub use local::LocalFileStore;
pub use manager::{StorageManager, metric_key};
pub use registry::Registry;
pub use s3::S3FileStore;
