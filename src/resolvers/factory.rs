//! Resolver for factory methods.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Slot;
use crate::container::Container;
use crate::descriptors::FactoryDescriptor;
use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::traits::{AnyArc, Resolver};

/// Resolves a key by invoking a factory method on its configuration object.
///
/// On each [`get`](Resolver::get):
///
/// 1. A singleton with a cached value returns it immediately.
/// 2. The configuration instance is resolved from the requesting scope
///    under the descriptor's owner key.
/// 3. The factory's dependencies are resolved one by one, left to right.
/// 4. The factory is invoked; a singleton stores the result.
///
/// Errors from any step propagate unchanged and leave the cache empty, so a
/// failed singleton is attempted again on the next access.
pub struct FactoryResolver {
    key: Key,
    descriptor: Arc<FactoryDescriptor>,
    lifetime: Lifetime,
    slot: Mutex<Slot>,
}

impl FactoryResolver {
    pub fn new(key: Key, descriptor: Arc<FactoryDescriptor>, lifetime: Lifetime) -> Self {
        Self {
            key,
            descriptor,
            lifetime,
            slot: Mutex::new(Slot::Uncomputed),
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub fn descriptor(&self) -> &FactoryDescriptor {
        &self.descriptor
    }

    /// Whether a compute-once resolver holds its value.
    pub fn is_computed(&self) -> bool {
        self.slot.lock().value().is_some()
    }

    fn compute(&self, container: &Container) -> DiResult<AnyArc> {
        let config = container.get_key(self.descriptor.owner())?;

        let dependencies = self.descriptor.dependencies(container.metadata());
        let mut args = Vec::with_capacity(dependencies.len());
        for dependency in &dependencies {
            tracing::trace!(key = %self.key, %dependency, "resolving factory dependency");
            args.push(container.get_key(dependency)?);
        }

        self.descriptor.invoke(&config, &args)
    }
}

impl Resolver for FactoryResolver {
    fn get(&self, container: &Container, _key: &Key) -> DiResult<AnyArc> {
        if self.lifetime.is_cached() {
            // lock released before the factory runs
            let cached = self.slot.lock().value();
            if let Some(value) = cached {
                tracing::trace!(key = %self.key, "factory cache hit");
                return Ok(value);
            }
        }

        let value = self.compute(container).map_err(|error| {
            tracing::warn!(
                key = %self.key,
                owner = %self.descriptor.owner(),
                method = self.descriptor.method(),
                %error,
                "factory method failed"
            );
            error
        })?;

        if self.lifetime.is_cached() {
            return Ok(self.slot.lock().fill(value));
        }
        Ok(value)
    }
}
