//! Backend resolver: routes a bucket descriptor to the backend that serves
//! it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use bucketry_core::config::backends::BackendsConfig;
use bucketry_core::error::AppError;
use bucketry_core::result::AppResult;
use bucketry_core::types::BucketId;

use crate::backend::BucketBackend;
use crate::descriptor::BucketDescriptor;

/// Holds the named backends and the bindings that select one per
/// descriptor.
///
/// Resolution tries, for the descriptor and then each ancestor in turn, a
/// binding on its id and then on its qualified name. If none matches, the
/// default backend is used.
#[derive(Debug, Clone, Default)]
pub struct BackendResolver {
    /// Backend name → implementation.
    backends: Arc<RwLock<HashMap<String, Arc<dyn BucketBackend>>>>,
    /// Descriptor key (id or qualified name) → backend name.
    bindings: Arc<RwLock<HashMap<String, String>>>,
    /// Fallback backend name.
    default_backend: Arc<RwLock<Option<String>>>,
}

impl BackendResolver {
    /// Create a resolver with no backends and no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver whose bindings and default come from configuration.
    ///
    /// Backend implementations still have to be registered with
    /// [`register_backend`](Self::register_backend).
    pub fn from_config(config: &BackendsConfig) -> Self {
        let bindings = config
            .bindings
            .iter()
            .map(|b| (normalize_key(&b.bucket), b.backend.clone()))
            .collect();

        Self {
            backends: Arc::new(RwLock::new(HashMap::new())),
            bindings: Arc::new(RwLock::new(bindings)),
            default_backend: Arc::new(RwLock::new(config.default_backend.clone())),
        }
    }

    /// Register a backend implementation under `name`, replacing any
    /// previous one.
    pub async fn register_backend(&self, name: &str, backend: Arc<dyn BucketBackend>) {
        debug!(
            backend = name,
            backend_type = backend.backend_type(),
            "Registering bucket backend"
        );
        let mut backends = self.backends.write().await;
        backends.insert(name.to_string(), backend);
    }

    /// Bind a descriptor key (bucket id or qualified name) to a backend.
    pub async fn bind(&self, bucket_key: &str, backend_name: &str) {
        let mut bindings = self.bindings.write().await;
        bindings.insert(normalize_key(bucket_key), backend_name.to_string());
    }

    /// Set the fallback backend.
    pub async fn set_default_backend(&self, backend_name: &str) {
        let mut default = self.default_backend.write().await;
        *default = Some(backend_name.to_string());
    }

    /// Names of all registered backends, sorted.
    pub async fn backend_names(&self) -> Vec<String> {
        let backends = self.backends.read().await;
        let mut names: Vec<String> = backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve the backend serving `descriptor`.
    pub async fn resolve(
        &self,
        descriptor: &BucketDescriptor,
    ) -> AppResult<Arc<dyn BucketBackend>> {
        let backend_name = self.backend_name_for(descriptor).await.ok_or_else(|| {
            AppError::no_backend(format!(
                "no backend configured for bucket {}",
                descriptor.qualified_name()
            ))
        })?;

        let backends = self.backends.read().await;
        backends.get(&backend_name).cloned().ok_or_else(|| {
            AppError::no_backend(format!(
                "bucket {} is bound to backend {backend_name:?}, which is not registered",
                descriptor.qualified_name()
            ))
        })
    }

    /// The backend name selected for `descriptor`, if any.
    async fn backend_name_for(&self, descriptor: &BucketDescriptor) -> Option<String> {
        {
            let bindings = self.bindings.read().await;
            for candidate in descriptor.lineage() {
                let by_id = candidate
                    .id()
                    .and_then(|id| bindings.get(&id.to_string()));
                if let Some(name) = by_id.or_else(|| bindings.get(candidate.qualified_name())) {
                    return Some(name.clone());
                }
            }
        }

        let default = self.default_backend.read().await;
        default.clone()
    }
}

/// Canonicalize id keys so that any accepted UUID spelling matches.
fn normalize_key(key: &str) -> String {
    match key.parse::<BucketId>() {
        Ok(id) => id.to_string(),
        Err(_) => key.to_string(),
    }
}
