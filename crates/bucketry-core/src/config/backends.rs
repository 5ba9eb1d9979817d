//! Backend binding configuration.

use serde::{Deserialize, Serialize};

/// How bucket descriptors map onto named backend implementations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Backend used when neither a descriptor nor any of its ancestors is
    /// bound explicitly.
    #[serde(default)]
    pub default_backend: Option<String>,
    /// Explicit descriptor-to-backend bindings.
    #[serde(default)]
    pub bindings: Vec<BackendBinding>,
}

/// One binding of a bucket descriptor to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendBinding {
    /// Descriptor key: a bucket id or a qualified name.
    pub bucket: String,
    /// Name the backend was registered under.
    pub backend: String,
}
