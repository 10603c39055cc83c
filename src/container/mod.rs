//! Hierarchical container for resolving keys.
//!
//! A [`Container`] is one scope in a tree of scopes. Each scope owns a map
//! from [`Key`] to resolver; declarations, metadata providers, observers and
//! options are shared by every scope built from the same
//! [`ServiceCollection`](crate::ServiceCollection).

use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use crate::error::{DiError, DiResult};
use crate::internal::StackGuard;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::metadata::{MetadataChain, TypeMetadataProvider};
use crate::observer::Observers;
use crate::options::ContainerOptions;
use crate::registration::Registry;
use crate::resolvers::StrategyResolver;
use crate::traits::{AnyArc, Constructor, Resolver};

/// A dependency injection scope.
///
/// Cloning is cheap and yields a handle to the same scope.
///
/// # Resolution
///
/// [`get_key`](Container::get_key) in a scope S proceeds as follows:
///
/// 1. `Key::of::<Container>()` resolves to S itself.
/// 2. If S holds a resolver for the key, the resolver produces the value.
/// 3. If S is the root, the key is registered on demand: through its declared
///    policy if it has one, otherwise through a known constructor with the
///    default lifetime from [`ContainerOptions`]. Unknown keys fail with
///    [`DiError::NotFound`].
/// 4. If S is a child and the key has a declared policy, the policy binds it
///    from S (and picks S or the root as the registering scope).
/// 5. Otherwise the parent resolves it.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{Container, Key};
///
/// let root = Container::new();
/// root.register_instance(Key::named("greeting"), String::from("hello"));
///
/// let child = root.create_child();
/// assert_eq!(*child.get_by::<String>(&Key::named("greeting")).unwrap(), "hello");
/// assert!(child.root().is_root());
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    parent: Option<Container>,
    resolvers: RwLock<HashMap<Key, Arc<dyn Resolver>>>,
    shared: Arc<Shared>,
}

/// State shared by every scope of one container tree.
struct Shared {
    registry: Registry,
    metadata: MetadataChain,
    observers: Observers,
    options: ContainerOptions,
}

impl Container {
    /// Creates an empty root container with no declarations.
    pub fn new() -> Self {
        Self::from_parts(
            Registry::new(),
            MetadataChain::default(),
            Observers::new(),
            ContainerOptions::default(),
        )
    }

    pub(crate) fn from_parts(
        registry: Registry,
        metadata: MetadataChain,
        observers: Observers,
        options: ContainerOptions,
    ) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                parent: None,
                resolvers: RwLock::new(HashMap::new()),
                shared: Arc::new(Shared {
                    registry,
                    metadata,
                    observers,
                    options,
                }),
            }),
        }
    }

    // ----- Resolution -----

    /// Resolves the value registered under `key`.
    ///
    /// # Errors
    ///
    /// * [`DiError::NotFound`] if nothing in the scope chain can produce the key
    /// * [`DiError::Circular`] if the resolver for the key is already running on this thread
    /// * [`DiError::DepthExceeded`] past [`ContainerOptions::max_depth`] nested resolver calls
    /// * Any error raised by the resolver, unchanged
    pub fn get_key(&self, key: &Key) -> DiResult<AnyArc> {
        if *key == Key::of::<Container>() {
            return Ok(Arc::new(self.clone()));
        }

        let observers = &self.inner.shared.observers;
        if !observers.has_observers() {
            return self.resolve(key);
        }

        observers.resolving(key);
        let start = Instant::now();
        let result = self.resolve(key);
        match &result {
            Ok(_) => observers.resolved(key, start.elapsed()),
            Err(error) => observers.factory_failed(key, error),
        }
        result
    }

    /// Resolves `T` by its type key.
    ///
    /// ```
    /// use ferrous_factory::{Container, Key};
    ///
    /// let container = Container::new();
    /// container.register_instance(Key::of::<u32>(), 7u32);
    /// assert_eq!(*container.get::<u32>().unwrap(), 7);
    /// ```
    pub fn get<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.get_by::<T>(&Key::of::<T>())
    }

    /// Resolves `key` and downcasts the value to `T`.
    pub fn get_by<T: Send + Sync + 'static>(&self, key: &Key) -> DiResult<Arc<T>> {
        self.get_key(key)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    fn resolve(&self, key: &Key) -> DiResult<AnyArc> {
        if let Some(resolver) = self.local_resolver(key) {
            return self.invoke(&resolver, key);
        }

        let registry = &self.inner.shared.registry;
        match &self.inner.parent {
            None => {
                let resolver = self.register_on_demand(key)?;
                self.invoke(&resolver, key)
            }
            Some(parent) => match registry.declaration(key) {
                Some(declaration) => {
                    let policy = &declaration.policy;
                    // a root-scoped singleton someone already bound
                    let bound = if policy.lifetime().is_cached() && !policy.register_in_child() {
                        self.root().local_resolver(key)
                    } else {
                        None
                    };
                    let resolver = match bound {
                        Some(resolver) => resolver,
                        None => policy.bind(self, key, &declaration.target)?,
                    };
                    self.invoke(&resolver, key)
                }
                None => parent.resolve(key),
            },
        }
    }

    fn invoke(&self, resolver: &Arc<dyn Resolver>, key: &Key) -> DiResult<AnyArc> {
        let _guard = StackGuard::enter(resolver, key, self.inner.shared.options.max_depth)?;
        resolver.get(self, key)
    }

    fn register_on_demand(&self, key: &Key) -> DiResult<Arc<dyn Resolver>> {
        let shared = &self.inner.shared;
        if let Some(declaration) = shared.registry.declaration(key) {
            return declaration.policy.bind(self, key, &declaration.target);
        }

        if let Some(ctor) = shared.registry.constructor(key) {
            tracing::debug!(%key, lifetime = ?shared.options.default_lifetime, "registering constructible type");
            return Ok(match shared.options.default_lifetime {
                Lifetime::Singleton => self.register_singleton(key.clone(), ctor.clone()),
                Lifetime::Transient => self.register_transient(key.clone(), ctor.clone()),
            });
        }

        Err(DiError::NotFound(key.display_name()))
    }

    fn local_resolver(&self, key: &Key) -> Option<Arc<dyn Resolver>> {
        self.inner.resolvers.read().get(key).cloned()
    }

    // ----- Registration -----

    /// Registers `resolver` under `key` in this scope.
    ///
    /// The first resolver registered under a key wins: if one is already
    /// present it is kept and returned, and `resolver` is dropped.
    pub fn register_resolver(&self, key: Key, resolver: Arc<dyn Resolver>) -> Arc<dyn Resolver> {
        let mut resolvers = self.inner.resolvers.write();
        if let Some(existing) = resolvers.get(&key) {
            tracing::trace!(%key, "resolver already registered");
            return existing.clone();
        }
        tracing::debug!(%key, "registering resolver");
        resolvers.insert(key, resolver.clone());
        resolver
    }

    /// Registers a constructor whose value is built once and cached in this scope.
    pub fn register_singleton(&self, key: Key, ctor: Constructor) -> Arc<dyn Resolver> {
        self.register_resolver(key, Arc::new(StrategyResolver::singleton(ctor)))
    }

    /// Registers a constructor invoked on every resolution.
    pub fn register_transient(&self, key: Key, ctor: Constructor) -> Arc<dyn Resolver> {
        self.register_resolver(key, Arc::new(StrategyResolver::transient(ctor)))
    }

    /// Registers an existing value, replacing whatever this scope held under `key`.
    pub fn register_instance<T: Send + Sync + 'static>(&self, key: Key, value: T) -> Arc<dyn Resolver> {
        self.replace(key, Arc::new(StrategyResolver::instance(Arc::new(value))))
    }

    /// Registers a closure that produces the value for `key` on each resolution,
    /// replacing whatever this scope held under `key`.
    ///
    /// ```
    /// use ferrous_factory::{Container, Key};
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    ///
    /// let container = Container::new();
    /// let next = Arc::new(AtomicU32::new(0));
    /// container.register_handler(Key::named("id"), move |_, _| Ok(Arc::new(next.fetch_add(1, Ordering::SeqCst))));
    ///
    /// assert_eq!(*container.get_by::<u32>(&Key::named("id")).unwrap(), 0);
    /// assert_eq!(*container.get_by::<u32>(&Key::named("id")).unwrap(), 1);
    /// ```
    pub fn register_handler<F>(&self, key: Key, handler: F) -> Arc<dyn Resolver>
    where
        F: Fn(&Container, &Key) -> DiResult<AnyArc> + Send + Sync + 'static,
    {
        self.replace(key, Arc::new(StrategyResolver::handler(Arc::new(handler))))
    }

    fn replace(&self, key: Key, resolver: Arc<dyn Resolver>) -> Arc<dyn Resolver> {
        tracing::debug!(%key, "replacing resolver");
        self.inner.resolvers.write().insert(key, resolver.clone());
        resolver
    }

    /// Removes this scope's resolver for `key`, returning it.
    pub fn unregister(&self, key: &Key) -> Option<Arc<dyn Resolver>> {
        self.inner.resolvers.write().remove(key)
    }

    /// Whether a resolver is registered for `key` in this scope, or in any
    /// ancestor when `check_parent` is set.
    pub fn has_resolver(&self, key: &Key, check_parent: bool) -> bool {
        if self.inner.resolvers.read().contains_key(key) {
            return true;
        }
        match &self.inner.parent {
            Some(parent) if check_parent => parent.has_resolver(key, true),
            _ => false,
        }
    }

    // ----- Scopes -----

    /// Creates a child scope sharing this scope's declarations.
    pub fn create_child(&self) -> Container {
        Container {
            inner: Arc::new(ContainerInner {
                parent: Some(self.clone()),
                resolvers: RwLock::new(HashMap::new()),
                shared: self.inner.shared.clone(),
            }),
        }
    }

    pub fn parent(&self) -> Option<&Container> {
        self.inner.parent.as_ref()
    }

    /// The top-most ancestor, or this scope if it has no parent.
    pub fn root(&self) -> Container {
        let mut scope = self;
        while let Some(parent) = &scope.inner.parent {
            scope = parent;
        }
        scope.clone()
    }

    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Whether both handles refer to the same scope.
    pub fn same_scope(&self, other: &Container) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ----- Shared state -----

    /// Metadata providers consulted for factory method signatures.
    pub fn metadata(&self) -> &dyn TypeMetadataProvider {
        &self.inner.shared.metadata
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.inner.shared.options
    }

    /// Human-readable dump of this scope and its ancestors.
    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let mut depth = 0usize;
        let mut scope = Some(self);
        while let Some(current) = scope {
            let mut keys: Vec<String> = current.inner.resolvers.read().keys().map(|k| k.to_string()).collect();
            keys.sort();
            let _ = writeln!(out, "scope {} ({} resolvers)", depth, keys.len());
            for key in keys {
                let _ = writeln!(out, "  {}", key);
            }
            depth += 1;
            scope = current.parent();
        }

        let mut declared: Vec<String> = self
            .inner
            .shared
            .registry
            .declarations()
            .map(|(key, d)| format!("{} [{:?}]", key, d.policy.lifetime()))
            .collect();
        declared.sort();
        let _ = writeln!(out, "declarations ({})", declared.len());
        for line in declared {
            let _ = writeln!(out, "  {}", line);
        }
        out
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("root", &self.is_root())
            .field("resolvers", &self.inner.resolvers.read().len())
            .finish()
    }
}
