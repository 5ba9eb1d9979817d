//! # bucketry-storage
//!
//! Bucket descriptors and everything needed to route a file operation from
//! a descriptor to the backend that actually stores the bytes: filename
//! sanitizing, the process-wide descriptor registry, the backend contract,
//! and the configuration-driven resolver.

pub mod backend;
pub mod descriptor;
pub mod dispatch;
pub mod registry;
pub mod sanitize;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BucketBackend, ByteStream, IncomingFile, StorageReceipt};
pub use descriptor::{BucketDeclaration, BucketDescriptor};
pub use dispatch::BackendResolver;
pub use registry::{
    BucketRegistry, lookup_descriptor, lookup_descriptor_by_id, lookup_descriptor_by_name,
    register_descriptor, seal_registry,
};
pub use sanitize::{object_key, sanitize_filename};
