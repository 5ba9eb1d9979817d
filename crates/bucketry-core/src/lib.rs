//! # bucketry-core
//!
//! Core crate for Bucketry. Contains the unified error system, configuration
//! schemas, and the typed identifiers shared by the storage and catalog
//! crates.
//!
//! This crate has **no** internal dependencies on other Bucketry crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
