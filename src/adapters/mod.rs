//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (AWS SDK, local filesystem).
//!
//! Adapter categories:
//! - `object_store`: S3 client and in-memory object store
//! - `storage_manager`: file stores, backend registry, typed facade

pub mod object_store;
pub mod storage_manager;
