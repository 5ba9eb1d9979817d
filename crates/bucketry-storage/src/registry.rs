//! Bucket registry: indexes registered descriptors by id and by qualified
//! name.
//!
//! Registration belongs to process initialization. Once every bucket is
//! declared the registry can be sealed; after that it is read-only and any
//! further registration is a usage error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::{debug, info, warn};

use bucketry_core::error::AppError;
use bucketry_core::result::AppResult;
use bucketry_core::types::BucketId;

use crate::descriptor::{BucketDeclaration, BucketDescriptor};

/// Registry of all declared bucket descriptors.
#[derive(Debug, Default)]
pub struct BucketRegistry {
    /// Bucket id → descriptor.
    by_id: DashMap<BucketId, Arc<BucketDescriptor>>,
    /// Qualified name → descriptor.
    by_name: DashMap<String, Arc<BucketDescriptor>>,
    /// Set once initialization has finished.
    sealed: AtomicBool,
}

impl BucketRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `declaration` and index the resulting descriptor.
    ///
    /// A colliding id or name replaces the earlier mapping.
    pub fn register(&self, declaration: BucketDeclaration) -> AppResult<Arc<BucketDescriptor>> {
        if self.is_sealed() {
            return Err(AppError::usage(format!(
                "cannot register bucket {}: the registry is sealed",
                declaration.qualified_name()
            )));
        }

        let descriptor = Arc::new(declaration.into_descriptor()?);

        if let Some(id) = descriptor.id() {
            if let Some(previous) = self.by_id.insert(id, Arc::clone(&descriptor)) {
                warn!(
                    bucket_id = %id,
                    previous = %previous.qualified_name(),
                    current = %descriptor.qualified_name(),
                    "Bucket id re-registered, replacing earlier descriptor"
                );
            }
        }

        let name = descriptor.qualified_name().to_string();
        if self
            .by_name
            .insert(name.clone(), Arc::clone(&descriptor))
            .is_some()
        {
            warn!(bucket = %name, "Bucket name re-registered, replacing earlier descriptor");
        }

        debug!(
            bucket = %name,
            bucket_id = ?descriptor.id(),
            is_abstract = descriptor.is_abstract(),
            "Registered bucket"
        );

        Ok(descriptor)
    }

    /// Look up a descriptor by a key that is either an id or a qualified
    /// name.
    ///
    /// Keys that parse as a UUID are looked up by id, everything else by
    /// name. Every spelling `uuid` accepts counts as an id: hyphenated
    /// (`11111111-1111-...`), 32-digit simple hex, braced (`{...}`) and
    /// `urn:uuid:` prefixed, in either case. Prefer [`lookup_by_id`](Self::lookup_by_id) or
    /// [`lookup_by_name`](Self::lookup_by_name) when the key kind is known.
    pub fn lookup(&self, key: &str) -> AppResult<Arc<BucketDescriptor>> {
        match key.parse::<BucketId>() {
            Ok(id) => self.lookup_by_id(id),
            Err(_) => self.lookup_by_name(key),
        }
    }

    /// Look up a descriptor by id.
    pub fn lookup_by_id(&self, id: BucketId) -> AppResult<Arc<BucketDescriptor>> {
        self.by_id
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AppError::not_found(format!("unable to find bucket by id {id}")))
    }

    /// Look up a descriptor by qualified name.
    pub fn lookup_by_name(&self, name: &str) -> AppResult<Arc<BucketDescriptor>> {
        self.by_name
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AppError::not_found(format!("unable to find bucket by name {name:?}")))
    }

    /// End the initialization phase.
    pub fn seal(&self) {
        if !self.sealed.swap(true, Ordering::AcqRel) {
            info!(buckets = self.len(), "Bucket registry sealed");
        }
    }

    /// Whether the registry has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Number of registered qualified names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All registered descriptors, sorted by qualified name.
    pub fn descriptors(&self) -> Vec<Arc<BucketDescriptor>> {
        let mut all: Vec<Arc<BucketDescriptor>> = self
            .by_name
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        all.sort_by(|a, b| a.qualified_name().cmp(b.qualified_name()));
        all
    }
}

static GLOBAL_REGISTRY: LazyLock<BucketRegistry> = LazyLock::new(BucketRegistry::new);

/// The process-wide registry.
pub fn global() -> &'static BucketRegistry {
    &GLOBAL_REGISTRY
}

/// Register a bucket in the process-wide registry.
pub fn register_descriptor(declaration: BucketDeclaration) -> AppResult<Arc<BucketDescriptor>> {
    global().register(declaration)
}

/// Look up a bucket in the process-wide registry by id or qualified name.
pub fn lookup_descriptor(key: &str) -> AppResult<Arc<BucketDescriptor>> {
    global().lookup(key)
}

/// Look up a bucket in the process-wide registry by id.
pub fn lookup_descriptor_by_id(id: BucketId) -> AppResult<Arc<BucketDescriptor>> {
    global().lookup_by_id(id)
}

/// Look up a bucket in the process-wide registry by qualified name.
pub fn lookup_descriptor_by_name(name: &str) -> AppResult<Arc<BucketDescriptor>> {
    global().lookup_by_name(name)
}

/// Seal the process-wide registry.
pub fn seal_registry() {
    global().seal();
}
