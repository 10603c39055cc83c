//! Factory descriptors and declaration introspection.

use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::metadata::TypeMetadataProvider;
use crate::traits::AnyArc;

/// Erased factory body: `(configuration instance, positional dependencies) -> value`.
pub type ErasedFactory = Arc<dyn Fn(&AnyArc, &[AnyArc]) -> DiResult<AnyArc> + Send + Sync>;

type DeferredKeys = Arc<dyn Fn() -> Vec<Key> + Send + Sync>;

/// Explicit dependency list attached to a factory method.
///
/// A deferred list is evaluated on every resolution, which lets a list refer
/// to keys that do not exist yet when the factory is declared.
///
/// ```rust
/// use ferrous_factory::{Inject, Key};
///
/// let literal = Inject::from(vec![Key::named("a"), Key::named("b")]);
/// assert_eq!(literal.keys(), vec![Key::named("a"), Key::named("b")]);
///
/// let deferred = Inject::deferred(|| vec![Key::named("late")]);
/// assert_eq!(deferred.keys(), vec![Key::named("late")]);
/// ```
#[derive(Clone)]
pub enum Inject {
    Keys(Vec<Key>),
    Deferred(DeferredKeys),
}

impl Inject {
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn() -> Vec<Key> + Send + Sync + 'static,
    {
        Inject::Deferred(Arc::new(f))
    }

    /// The ordered keys to resolve.
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Inject::Keys(keys) => keys.clone(),
            Inject::Deferred(f) => f(),
        }
    }
}

impl From<Vec<Key>> for Inject {
    fn from(keys: Vec<Key>) -> Self {
        Inject::Keys(keys)
    }
}

impl fmt::Debug for Inject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inject::Keys(keys) => f.debug_tuple("Keys").field(keys).finish(),
            Inject::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A factory method bound to its defining configuration type.
///
/// Built once when the method is declared and never mutated afterwards.
/// Dependency metadata is always looked up against `owner`, the defining
/// configuration type, even when the value is exposed under another key.
#[derive(Clone)]
pub struct FactoryDescriptor {
    factory: ErasedFactory,
    owner: Key,
    method: &'static str,
    lifetime: Lifetime,
    inject: Option<Inject>,
}

impl FactoryDescriptor {
    pub fn new(owner: Key, method: &'static str, lifetime: Lifetime, factory: ErasedFactory) -> Self {
        Self {
            factory,
            owner,
            method,
            lifetime,
            inject: None,
        }
    }

    pub fn with_inject(mut self, inject: Inject) -> Self {
        self.inject = Some(inject);
        self
    }

    pub fn owner(&self) -> &Key {
        &self.owner
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub fn inject(&self) -> Option<&Inject> {
        self.inject.as_ref()
    }

    /// Keys to resolve before invoking the factory, in positional order.
    ///
    /// An explicit inject list is used verbatim; otherwise the metadata
    /// provider is asked for the declared parameter types of the method.
    pub fn dependencies(&self, metadata: &dyn TypeMetadataProvider) -> Vec<Key> {
        match &self.inject {
            Some(inject) => inject.keys(),
            None => metadata.parameter_types_of(&self.owner, self.method),
        }
    }

    pub fn invoke(&self, config: &AnyArc, args: &[AnyArc]) -> DiResult<AnyArc> {
        (self.factory)(config, args)
    }
}

impl fmt::Debug for FactoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryDescriptor")
            .field("owner", &self.owner)
            .field("method", &self.method)
            .field("lifetime", &self.lifetime)
            .field("inject", &self.inject)
            .finish()
    }
}

/// Snapshot of one declaration, for diagnostics.
///
/// ```rust
/// use ferrous_factory::{singleton, Container, DiResult, Injectable, Lifetime, ServiceCollection};
///
/// struct Logger;
/// struct Config;
/// impl Injectable for Config {
///     fn construct(_: &Container) -> DiResult<Self> { Ok(Config) }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.configuration::<Config>()
///     .factory("get_logger", singleton(), |_: &Config| -> DiResult<Logger> { Ok(Logger) });
///
/// let descriptors = services.get_service_descriptors();
/// assert_eq!(descriptors.len(), 1);
/// assert_eq!(descriptors[0].lifetime, Lifetime::Singleton);
/// assert_eq!(descriptors[0].method, Some("get_logger"));
/// assert!(descriptors[0].type_name().ends_with("Logger"));
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// The key the declaration is attached to
    pub key: Key,
    pub lifetime: Lifetime,
    /// Defining configuration type, for factory methods
    pub owner: Option<Key>,
    /// Factory method name, for factory methods
    pub method: Option<&'static str>,
    /// Whether a singleton registers in the requesting scope instead of the root
    pub register_in_child: bool,
}

impl ServiceDescriptor {
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    pub fn is_factory(&self) -> bool {
        self.method.is_some()
    }
}
