//! # bucketry
//!
//! Pluggable file-storage buckets. Declare bucket descriptors once at
//! startup, route their file operations to configured backends, and record
//! their identity in an application-provided catalog.
//!
//! ```no_run
//! use bucketry::storage::{BackendResolver, BucketDeclaration, register_descriptor, seal_registry};
//! use bucketry::config::AppConfig;
//!
//! # fn main() -> Result<(), bucketry::AppError> {
//! let config = AppConfig::load("development")?;
//! bucketry::init_logging(&config.logging)?;
//!
//! let media = register_descriptor(BucketDeclaration::new("app", "Media").abstract_bucket())?;
//! register_descriptor(
//!     BucketDeclaration::new("app", "Avatars")
//!         .with_id("11111111-1111-1111-1111-111111111111")
//!         .extends(&media),
//! )?;
//! seal_registry();
//!
//! let _backends = BackendResolver::from_config(&config.backends);
//! # Ok(())
//! # }
//! ```

pub mod logging;

pub use bucketry_catalog as catalog;
pub use bucketry_core::{AppError, AppResult, ErrorKind, config, error, types};
pub use bucketry_storage as storage;

pub use logging::init_logging;
