//! Catalog collaborator traits.
//!
//! Implemented by the application on top of whatever persistence it uses.

use async_trait::async_trait;

use bucketry_core::result::AppResult;
use bucketry_core::types::BucketId;

use crate::record::{CatalogBucketRecord, RecordKey};

/// A catalog of bucket records that hands out units of work.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Open a new transactional unit of work.
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;
}

/// A transactional scope over the catalog.
///
/// Writes become visible to other units of work only after
/// [`commit`](Self::commit). Dropping a unit of work without committing must
/// discard its writes.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Fetch the record addressed by `key`.
    async fn find_record(&mut self, key: &RecordKey) -> AppResult<Option<CatalogBucketRecord>>;

    /// Create a record with `name` and, optionally, `id`.
    async fn create_record(
        &mut self,
        name: &str,
        id: Option<BucketId>,
    ) -> AppResult<CatalogBucketRecord>;

    /// Make this unit's writes durable.
    async fn commit(&mut self) -> AppResult<()>;

    /// Discard this unit's writes.
    async fn rollback(&mut self) -> AppResult<()>;
}
