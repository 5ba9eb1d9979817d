//! Catalog record model.

use std::fmt;

use serde::{Deserialize, Serialize};

use bucketry_core::types::BucketId;
use bucketry_storage::descriptor::BucketDescriptor;

/// The persisted identity of a bucket descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogBucketRecord {
    /// Stable bucket id, when the descriptor declares one.
    pub id: Option<BucketId>,
    /// Qualified name of the descriptor.
    pub name: String,
}

/// How a record is looked up in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// By stable bucket id.
    Id(BucketId),
    /// By qualified name.
    Name(String),
}

impl RecordKey {
    /// Key for `descriptor`: its id when present, its name otherwise.
    ///
    /// `get_or_create_record` only reconciles concrete descriptors, which
    /// always carry an id. The name branch serves catalogs shared with
    /// callers that address id-less descriptors directly.
    pub fn for_descriptor(descriptor: &BucketDescriptor) -> Self {
        match descriptor.id() {
            Some(id) => Self::Id(id),
            None => Self::Name(descriptor.qualified_name().to_string()),
        }
    }

    /// Whether `record` is addressed by this key.
    pub fn matches(&self, record: &CatalogBucketRecord) -> bool {
        match self {
            Self::Id(id) => record.id == Some(*id),
            Self::Name(name) => record.name == *name,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}
