//! # bucketry-catalog
//!
//! Durable identity for bucket descriptors. The catalog itself (schema,
//! sessions, transactions) is provided by the application through the
//! [`Catalog`] and [`UnitOfWork`] traits; this crate only performs the
//! get-or-create of a descriptor's record inside one unit of work.

pub mod reconciler;
pub mod record;
pub mod traits;

pub use reconciler::get_or_create_record;
pub use record::{CatalogBucketRecord, RecordKey};
pub use traits::{Catalog, UnitOfWork};
