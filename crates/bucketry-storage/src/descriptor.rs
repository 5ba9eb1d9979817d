//! Bucket descriptors: the handles callers use to store and address files.
//!
//! A descriptor is declared once with a [`BucketDeclaration`] and becomes
//! usable only after [`BucketRegistry::register`](crate::registry::BucketRegistry::register)
//! has validated it. Registered descriptors are shared as
//! `Arc<BucketDescriptor>` and never mutated.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use bucketry_core::error::AppError;
use bucketry_core::result::AppResult;
use bucketry_core::types::{BucketId, ObjectId};

use crate::backend::{IncomingFile, StorageReceipt};
use crate::dispatch::BackendResolver;

/// Unvalidated declaration of a bucket kind.
#[derive(Debug, Clone)]
pub struct BucketDeclaration {
    qualified_name: String,
    id: Option<String>,
    is_abstract: bool,
    parent: Option<Arc<BucketDescriptor>>,
}

impl BucketDeclaration {
    /// Declare a bucket named `name` inside `namespace`.
    ///
    /// The qualified name is `"{namespace}.{name}"`, or just `name` when the
    /// namespace is empty.
    pub fn new(namespace: &str, name: &str) -> Self {
        let qualified_name = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        };
        Self::qualified(qualified_name)
    }

    /// Declare a bucket from an already qualified name.
    pub fn qualified(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            id: None,
            is_abstract: false,
            parent: None,
        }
    }

    /// Set the stable bucket id (a UUID string, validated at registration).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Mark the bucket as an abstract template.
    pub fn abstract_bucket(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Derive this bucket from `parent`, making it part of the parent's
    /// backend family.
    pub fn extends(mut self, parent: &Arc<BucketDescriptor>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// The qualified name this declaration will register under.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Validate the declaration and turn it into a descriptor.
    pub(crate) fn into_descriptor(self) -> AppResult<BucketDescriptor> {
        if self.qualified_name.trim().is_empty() {
            return Err(AppError::invalid_descriptor(
                "bucket qualified name must not be empty",
            ));
        }
        if self.qualified_name.split('.').any(|part| part.trim().is_empty()) {
            return Err(AppError::invalid_descriptor(format!(
                "bucket qualified name {:?} has an empty namespace or name",
                self.qualified_name
            )));
        }

        let id = match self.id.as_deref() {
            Some(raw) => Some(BucketId::parse_declared(raw)?),
            None if self.is_abstract => None,
            None => {
                return Err(AppError::invalid_descriptor(format!(
                    "missing a required id for non-abstract bucket {}",
                    self.qualified_name
                )));
            }
        };

        Ok(BucketDescriptor {
            id,
            qualified_name: self.qualified_name,
            is_abstract: self.is_abstract,
            parent: self.parent,
        })
    }
}

/// A registered bucket kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketDescriptor {
    id: Option<BucketId>,
    qualified_name: String,
    is_abstract: bool,
    parent: Option<Arc<BucketDescriptor>>,
}

impl BucketDescriptor {
    /// Stable id. Always present on concrete descriptors.
    pub fn id(&self) -> Option<BucketId> {
        self.id
    }

    /// Namespace-qualified name.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Whether this descriptor is an abstract template.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// The descriptor this one was derived from.
    pub fn parent(&self) -> Option<&BucketDescriptor> {
        self.parent.as_deref()
    }

    /// This descriptor followed by its parent chain, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = &BucketDescriptor> {
        std::iter::successors(Some(self), |d| d.parent())
    }

    /// Fail with [`ErrorKind::AbstractBucket`](bucketry_core::ErrorKind::AbstractBucket)
    /// if this descriptor is abstract.
    pub fn ensure_concrete(&self) -> AppResult<()> {
        if self.is_abstract {
            return Err(AppError::abstract_bucket(format!(
                "unable to perform a file operation on an abstract bucket {}",
                self.qualified_name
            )));
        }
        Ok(())
    }

    /// Store a streamed file for `object_id`.
    pub async fn store_from_stream(
        &self,
        backends: &BackendResolver,
        object_id: ObjectId,
        file: IncomingFile,
    ) -> AppResult<StorageReceipt> {
        self.ensure_concrete()?;
        let backend = backends.resolve(self).await?;
        debug!(
            bucket = %self.qualified_name,
            backend = backend.backend_type(),
            %object_id,
            filename = %file.filename,
            "Storing file from stream"
        );
        backend.store_from_stream(self, object_id, file).await
    }

    /// Store the file at `source_path` for `object_id`, optionally renamed
    /// to `name`.
    pub async fn store_from_path(
        &self,
        backends: &BackendResolver,
        object_id: ObjectId,
        source_path: &Path,
        name: Option<&str>,
    ) -> AppResult<StorageReceipt> {
        self.ensure_concrete()?;
        let backend = backends.resolve(self).await?;
        debug!(
            bucket = %self.qualified_name,
            backend = backend.backend_type(),
            %object_id,
            source = %source_path.display(),
            "Storing file from path"
        );
        backend
            .store_from_path(self, object_id, source_path, name)
            .await
    }

    /// Public URL of `filename` stored for `object_id`.
    pub async fn public_url(
        &self,
        backends: &BackendResolver,
        object_id: ObjectId,
        filename: &str,
    ) -> AppResult<String> {
        self.ensure_concrete()?;
        let backend = backends.resolve(self).await?;
        backend.public_url(self, object_id, filename).await
    }

    /// Backend storage path of `filename` stored for `object_id`.
    pub async fn storage_path(
        &self,
        backends: &BackendResolver,
        object_id: ObjectId,
        filename: &str,
    ) -> AppResult<String> {
        self.ensure_concrete()?;
        let backend = backends.resolve(self).await?;
        backend.storage_path(self, object_id, filename).await
    }
}

impl fmt::Display for BucketDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}
