//! Object Store Adapters - Implementations of the `ObjectStore` port
//!
//! - `s3_client`: AWS SDK client for S3 and S3-compatible services
//! - `memory`: process-local buckets with S3 error semantics

pub mod memory;
pub mod s3_client;

pub use memory::InMemoryObjectStore;
pub use s3_client::AwsObjectStore;
