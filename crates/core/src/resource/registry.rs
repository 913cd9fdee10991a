use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{error::RegistryError, models::Resource};

/// Thread-safe, in-memory store of resources keyed by code.
///
/// Cloning yields another handle to the same collection. Each operation holds
/// the lock for its whole duration, so the duplicate check in [`add`] and the
/// append that follows it happen atomically.
///
/// [`add`]: Registry::add
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    resources: Vec<Resource>,
}

impl Inner {
    fn position(&self, code: &str) -> Option<usize> {
        self.resources
            .iter()
            .position(|resource| resource.code() == code)
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource, rejecting codes that are already registered.
    pub fn add(&self, resource: Resource) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();
        if inner.position(resource.code()).is_some() {
            warn!("rejected duplicate resource code {}", resource.code());
            return Err(RegistryError::DuplicateCode(resource.code().to_string()));
        }

        info!("registered resource {}", resource.code());
        inner.resources.push(resource);
        Ok(())
    }

    /// Snapshot of every resource in insertion order.
    pub fn list(&self) -> Vec<Resource> {
        self.inner.read().resources.clone()
    }

    /// Replace the resource registered under `code`.
    ///
    /// Returns `Ok(false)` when nothing is registered under `code`. The
    /// replacement must carry the same code and takes the original's place
    /// in iteration order.
    pub fn update(&self, code: &str, resource: Resource) -> Result<bool, RegistryError> {
        if resource.code() != code {
            warn!(
                "rejected update of {} with resource coded {}",
                code,
                resource.code()
            );
            return Err(RegistryError::CodeMismatch {
                expected: code.to_string(),
                found: resource.code().to_string(),
            });
        }

        let mut inner = self.inner.write();
        match inner.position(code) {
            Some(index) => {
                info!("updated resource {}", code);
                inner.resources[index] = resource;
                Ok(true)
            }
            None => {
                debug!("no resource to update under {}", code);
                Ok(false)
            }
        }
    }

    /// Look up a resource by exact, case-sensitive code.
    pub fn search(&self, code: &str) -> Option<Resource> {
        let inner = self.inner.read();
        let found = inner
            .resources
            .iter()
            .find(|resource| resource.code() == code)
            .cloned();
        debug!("search for {} matched: {}", code, found.is_some());
        found
    }

    /// Whether a resource is registered under `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.inner.read().position(code).is_some()
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.inner.read().resources.len()
    }

    /// Whether the registry holds no resources.
    pub fn is_empty(&self) -> bool {
        self.inner.read().resources.is_empty()
    }
}
