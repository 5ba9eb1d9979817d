//! Backend contract for pluggable bucket storage.
//!
//! Concrete backends (local filesystem, object storage, HTTP upload targets)
//! live outside this workspace and implement [`BucketBackend`]. A single
//! backend may serve many buckets; every call receives the descriptor so the
//! backend can key its namespace off it.

use std::fmt;
use std::path::Path;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

use bucketry_core::result::AppResult;
use bucketry_core::types::ObjectId;

use crate::descriptor::BucketDescriptor;

/// A byte stream type used for incoming file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A file arriving as a stream, typically an HTTP upload.
pub struct IncomingFile {
    /// Filename as supplied by the client. Not sanitized.
    pub filename: String,
    /// MIME type, if the client sent one.
    pub content_type: Option<String>,
    /// File contents.
    pub body: ByteStream,
}

impl IncomingFile {
    /// Wrap a byte stream.
    pub fn new(filename: impl Into<String>, body: ByteStream) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            body,
        }
    }

    /// Wrap an in-memory buffer as a single-chunk stream.
    pub fn from_bytes(filename: impl Into<String>, data: Bytes) -> Self {
        Self::new(
            filename,
            Box::pin(futures::stream::iter([Ok::<_, std::io::Error>(data)])),
        )
    }

    /// Attach a MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl fmt::Debug for IncomingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncomingFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// What a backend reports after storing a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageReceipt {
    /// Qualified name of the bucket the file was stored in.
    pub bucket: String,
    /// Object the file belongs to.
    pub object_id: ObjectId,
    /// Stored (sanitized) filename.
    pub filename: String,
    /// Backend-specific storage path or key.
    pub path: String,
    /// Number of bytes written.
    pub size_bytes: u64,
    /// When the backend finished writing.
    pub stored_at: DateTime<Utc>,
}

/// Trait for bucket storage backends.
///
/// Implementations are registered by name on a
/// [`BackendResolver`](crate::dispatch::BackendResolver), which picks one
/// per descriptor.
#[async_trait]
pub trait BucketBackend: Send + Sync + fmt::Debug + 'static {
    /// Return the backend type name (e.g. "local", "s3").
    fn backend_type(&self) -> &str;

    /// Store a streamed file for `object_id`.
    async fn store_from_stream(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        file: IncomingFile,
    ) -> AppResult<StorageReceipt>;

    /// Store the file at `source_path` for `object_id`, optionally under a
    /// different name.
    async fn store_from_path(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        source_path: &Path,
        name: Option<&str>,
    ) -> AppResult<StorageReceipt>;

    /// Public URL of a stored file.
    async fn public_url(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        filename: &str,
    ) -> AppResult<String>;

    /// Backend storage path of a stored file.
    async fn storage_path(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        filename: &str,
    ) -> AppResult<String>;
}
