//! Newtype wrappers around [`uuid::Uuid`] for bucket and object identifiers.
//!
//! Distinct types keep a bucket id from being passed where an object id is
//! expected, and vice versa.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, ErrorKind};

/// Macro to define a newtype ID wrapper around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Stable identifier of a concrete bucket descriptor.
    ///
    /// Declared once in source and never generated at runtime, so there is
    /// no `new()` constructor.
    BucketId
);

define_id!(
    /// Identifier of the object (entity) a stored file belongs to.
    ObjectId
);

impl BucketId {
    /// Parse a declared bucket id, reporting failures as
    /// [`ErrorKind::InvalidDescriptor`].
    pub fn parse_declared(raw: &str) -> Result<Self, AppError> {
        raw.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::InvalidDescriptor,
                format!("invalid bucket UUID {raw:?}"),
                e,
            )
        })
    }
}

impl ObjectId {
    /// Create a new random object identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}
