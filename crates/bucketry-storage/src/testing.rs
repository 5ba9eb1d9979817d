//! In-crate test double for [`BucketBackend`].

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;

use bucketry_core::result::AppResult;
use bucketry_core::types::ObjectId;

use crate::backend::{BucketBackend, IncomingFile, StorageReceipt};
use crate::descriptor::BucketDescriptor;
use crate::sanitize::{object_key, sanitize_filename};

/// One forwarded backend call.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub operation: &'static str,
    pub bucket: String,
    pub object_id: ObjectId,
    pub argument: String,
}

/// Backend that records every call and fabricates deterministic results.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    name: String,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        operation: &'static str,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        argument: &str,
    ) {
        self.calls.lock().unwrap().push(RecordedCall {
            operation,
            bucket: bucket.qualified_name().to_string(),
            object_id,
            argument: argument.to_string(),
        });
    }

    fn receipt(
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        filename: &str,
        size_bytes: u64,
    ) -> StorageReceipt {
        StorageReceipt {
            bucket: bucket.qualified_name().to_string(),
            object_id,
            filename: sanitize_filename(filename),
            path: object_key(bucket, object_id, filename),
            size_bytes,
            stored_at: Utc::now(),
        }
    }
}

#[async_trait]
impl BucketBackend for RecordingBackend {
    fn backend_type(&self) -> &str {
        &self.name
    }

    async fn store_from_stream(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        mut file: IncomingFile,
    ) -> AppResult<StorageReceipt> {
        self.record("store_from_stream", bucket, object_id, &file.filename);
        let mut size = 0u64;
        while let Some(chunk) = file.body.next().await {
            size += chunk?.len() as u64;
        }
        Ok(Self::receipt(bucket, object_id, &file.filename, size))
    }

    async fn store_from_path(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        source_path: &Path,
        name: Option<&str>,
    ) -> AppResult<StorageReceipt> {
        let source = source_path.display().to_string();
        self.record("store_from_path", bucket, object_id, &source);
        let filename = name
            .map(str::to_string)
            .or_else(|| {
                source_path
                    .file_name()
                    .map(|f| f.to_string_lossy().to_string())
            })
            .unwrap_or_default();
        Ok(Self::receipt(bucket, object_id, &filename, 0))
    }

    async fn public_url(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        filename: &str,
    ) -> AppResult<String> {
        self.record("public_url", bucket, object_id, filename);
        Ok(format!(
            "https://files.test/{}",
            object_key(bucket, object_id, filename)
        ))
    }

    async fn storage_path(
        &self,
        bucket: &BucketDescriptor,
        object_id: ObjectId,
        filename: &str,
    ) -> AppResult<String> {
        self.record("storage_path", bucket, object_id, filename);
        Ok(object_key(bucket, object_id, filename))
    }
}
