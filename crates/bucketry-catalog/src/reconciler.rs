//! Get-or-create reconciliation of a descriptor against the catalog.

use tracing::{debug, warn};

use bucketry_core::error::AppError;
use bucketry_core::result::AppResult;
use bucketry_storage::descriptor::BucketDescriptor;

use crate::record::{CatalogBucketRecord, RecordKey};
use crate::traits::{Catalog, UnitOfWork};

/// Return the catalog record for `bucket`, creating it if it does not exist.
///
/// The lookup and the creation run in one unit of work, which is committed
/// on success and rolled back on any error, including a failed commit.
/// Buckets with an id are matched by id, others by qualified name. Catalog
/// errors are returned unchanged.
pub async fn get_or_create_record<C>(
    bucket: &BucketDescriptor,
    catalog: &C,
) -> AppResult<CatalogBucketRecord>
where
    C: Catalog + ?Sized,
{
    if bucket.is_abstract() {
        return Err(AppError::abstract_bucket(format!(
            "unable to reconcile abstract bucket {} with the catalog",
            bucket.qualified_name()
        )));
    }

    let key = RecordKey::for_descriptor(bucket);
    let mut unit = catalog.begin().await?;

    let outcome = match find_or_create(&mut *unit, bucket, &key).await {
        Ok(record) => unit.commit().await.map(|()| record),
        Err(err) => Err(err),
    };

    // A failed commit is rolled back too, so the scope is released on every
    // error path.
    if outcome.is_err() {
        if let Err(rollback_err) = unit.rollback().await {
            warn!(
                bucket = %bucket.qualified_name(),
                error = %rollback_err,
                "Catalog rollback failed"
            );
        }
    }
    outcome
}

async fn find_or_create(
    unit: &mut dyn UnitOfWork,
    bucket: &BucketDescriptor,
    key: &RecordKey,
) -> AppResult<CatalogBucketRecord> {
    if let Some(record) = unit.find_record(key).await? {
        debug!(bucket = %bucket.qualified_name(), %key, "Found catalog record");
        return Ok(record);
    }

    debug!(bucket = %bucket.qualified_name(), %key, "Creating catalog record");
    unit.create_record(bucket.qualified_name(), bucket.id()).await
}
