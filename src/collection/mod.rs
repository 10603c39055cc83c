//! Service collection module for declaring registrations.
//!
//! This module contains the ServiceCollection type: the declaration table
//! that configuration types, injectable types and class-level annotations
//! are recorded in before a [`Container`] is built from it.

use std::sync::Arc;

use crate::annotations::Annotation;
use crate::container::Container;
use crate::descriptors::{FactoryDescriptor, ServiceDescriptor};
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::metadata::{MetadataChain, Signature, SignatureTable, TypeMetadataProvider};
use crate::observer::{DiObserver, Observers};
use crate::options::ContainerOptions;
use crate::policy::Target;
use crate::registration::Registry;
use crate::traits::{Constructor, Injectable};

pub mod configuration;
pub mod module_system;
pub use configuration::ConfigurationBuilder;
pub use module_system::ServiceModule;

/// Declarations waiting to be turned into a [`Container`].
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{singleton, Container, DiResult, Injectable, ServiceCollection};
/// use std::sync::Arc;
///
/// struct Logger;
///
/// struct Config;
/// impl Injectable for Config {
///     fn construct(_: &Container) -> DiResult<Self> { Ok(Config) }
/// }
///
/// let mut services = ServiceCollection::new();
/// services
///     .configuration::<Config>()
///     .factory("get_logger", singleton(), |_: &Config| -> DiResult<Logger> { Ok(Logger) });
///
/// let container = services.build();
/// let first = container.get::<Logger>().unwrap();
/// let second = container.get::<Logger>().unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct ServiceCollection {
    registry: Registry,
    signatures: SignatureTable,
    providers: Vec<Arc<dyn TypeMetadataProvider>>,
    observers: Observers,
    options: ContainerOptions,
}

impl ServiceCollection {
    /// Creates a new empty service collection.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            signatures: SignatureTable::new(),
            providers: Vec::new(),
            observers: Observers::new(),
            options: ContainerOptions::default(),
        }
    }

    // ----- Types -----

    /// Makes `T` constructible by the container through [`Injectable`].
    ///
    /// Without an annotation the type is registered on first resolution with
    /// the container's default lifetime.
    pub fn add_injectable<T: Injectable>(&mut self) -> &mut Self {
        self.registry.add_constructor(Key::of::<T>(), Constructor::of::<T>());
        self
    }

    /// Makes `key` constructible by an arbitrary constructor.
    pub fn add_constructor(&mut self, key: Key, ctor: Constructor) -> &mut Self {
        self.registry.add_constructor(key, ctor);
        self
    }

    /// Attaches a class-level policy to an injectable type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_factory::{transient, Container, DiResult, Injectable, ServiceCollection};
    /// use std::sync::Arc;
    ///
    /// struct Request;
    /// impl Injectable for Request {
    ///     fn construct(_: &Container) -> DiResult<Self> { Ok(Request) }
    /// }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.annotate_type::<Request>(transient());
    ///
    /// let container = services.build();
    /// let a = container.get::<Request>().unwrap();
    /// let b = container.get::<Request>().unwrap();
    /// assert!(!Arc::ptr_eq(&a, &b));
    /// ```
    pub fn annotate_type<T: Injectable>(&mut self, annotation: Annotation) -> &mut Self {
        let key = annotation.key().cloned().unwrap_or_else(Key::of::<T>);
        tracing::debug!(%key, lifetime = ?annotation.lifetime(), "declaring type");
        self.registry.declare_type(key, annotation.policy(), Constructor::of::<T>());
        self
    }

    // ----- Configuration types -----

    /// Opens a configuration type for factory method declarations.
    ///
    /// The configuration type itself becomes constructible, so the container
    /// can create the instance the factories are invoked on.
    pub fn configuration<C: Injectable>(&mut self) -> ConfigurationBuilder<'_, C> {
        let owner = Key::of::<C>();
        if self.registry.constructor(&owner).is_none() {
            self.registry.add_constructor(owner, Constructor::of::<C>());
        }
        ConfigurationBuilder::new(self)
    }

    /// Registers a module of declarations.
    pub fn add_module<M: ServiceModule>(&mut self, module: M) -> DiResult<&mut Self> {
        module.register_services(self)?;
        Ok(self)
    }

    // ----- Metadata, observers, options -----

    /// Adds a metadata provider consulted before the captured signatures.
    ///
    /// Providers are asked in the order they were added.
    pub fn add_metadata_provider(&mut self, provider: Arc<dyn TypeMetadataProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    /// Adds an observer notified around every resolution.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    pub fn with_options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// Signatures captured from typed factory declarations.
    pub fn signatures(&self) -> &SignatureTable {
        &self.signatures
    }

    /// Snapshot of every declaration, ordered by key name.
    pub fn get_service_descriptors(&self) -> Vec<ServiceDescriptor> {
        let mut descriptors: Vec<ServiceDescriptor> = self
            .registry
            .declarations()
            .map(|(key, declaration)| {
                let (owner, method) = match &declaration.target {
                    Target::Factory(d) => (Some(d.owner().clone()), Some(d.method())),
                    Target::Constructor(_) => (None, None),
                };
                ServiceDescriptor {
                    key: key.clone(),
                    lifetime: declaration.policy.lifetime(),
                    owner,
                    method,
                    register_in_child: declaration.policy.register_in_child(),
                }
            })
            .collect();
        descriptors.sort_by(|a, b| a.key.to_string().cmp(&b.key.to_string()));
        descriptors
    }

    /// Builds the root container.
    pub fn build(self) -> Container {
        tracing::debug!(
            declarations = self.registry.declarations().count(),
            constructors = self.registry.constructors().count(),
            "building container"
        );
        let mut providers = self.providers;
        providers.push(Arc::new(self.signatures));
        Container::from_parts(self.registry, MetadataChain::new(providers), self.observers, self.options)
    }

    // ----- Declaration internals -----

    /// Records the signature of a typed factory method.
    pub(crate) fn record_signature(&mut self, owner: Key, method: &'static str, signature: Signature) {
        self.signatures.record(owner, method, signature);
    }

    /// Attaches a factory method declaration to its registration key.
    ///
    /// The key is the annotation's override if present, otherwise the
    /// method's declared return type as reported by the metadata providers.
    pub(crate) fn declare_factory(&mut self, annotation: &Annotation, descriptor: FactoryDescriptor) -> DiResult<Key> {
        let key = self
            .registration_key(annotation, &descriptor)
            .ok_or_else(|| DiError::no_resolvable_key(descriptor.owner().display_name(), descriptor.method()))?;
        self.attach_factory(key.clone(), annotation, descriptor);
        Ok(key)
    }

    /// Attaches a typed factory method declaration.
    ///
    /// Falls back to `returns`, the closure's output type, when neither the
    /// annotation nor a metadata provider names a key.
    pub(crate) fn declare_typed_factory(
        &mut self,
        annotation: &Annotation,
        descriptor: FactoryDescriptor,
        returns: Key,
    ) -> Key {
        let key = self.registration_key(annotation, &descriptor).unwrap_or(returns);
        self.attach_factory(key.clone(), annotation, descriptor);
        key
    }

    fn registration_key(&self, annotation: &Annotation, descriptor: &FactoryDescriptor) -> Option<Key> {
        annotation
            .key()
            .cloned()
            .or_else(|| self.return_type_of(descriptor.owner(), descriptor.method()))
    }

    fn attach_factory(&mut self, key: Key, annotation: &Annotation, descriptor: FactoryDescriptor) {
        tracing::debug!(
            %key,
            owner = %descriptor.owner(),
            method = descriptor.method(),
            lifetime = ?annotation.lifetime(),
            "declaring factory method"
        );
        self.registry.declare_factory(key, annotation.policy(), descriptor);
    }

    fn return_type_of(&self, owner: &Key, method: &'static str) -> Option<Key> {
        self.providers
            .iter()
            .find_map(|p| p.return_type_of(owner, method))
            .or_else(|| self.signatures.return_type_of(owner, method))
    }
}

impl Default for ServiceCollection {
    fn default() -> Self {
        Self::new()
    }
}
