//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) the storage manager requires from
//! the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `FileStore`: the four file primitives a storage backend provides
//! - `ObjectStore`: bucket/key object CRUD against an S3-compatible service

pub mod file_store;
pub mod object_store;
