//! Core type definitions used across the Bucketry workspace.

pub mod id;

pub use id::*;
