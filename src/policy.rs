//! Registration policies.
//!
//! A policy is the lifetime strategy attached to a key at declaration time.
//! The first time a scope resolves the key and finds no resolver, the policy
//! is asked to [`bind`](RegistrationPolicy::bind): it creates the resolver,
//! registers it in the right scope, and hands it back for the pending
//! resolution.

use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::descriptors::FactoryDescriptor;
use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::resolvers::FactoryResolver;
use crate::traits::{Constructor, Resolver};

/// What a policy binds: a factory method, or a plain constructor.
#[derive(Debug, Clone)]
pub enum Target {
    Factory(Arc<FactoryDescriptor>),
    Constructor(Constructor),
}

/// Customizes how a key is registered with a container.
///
/// Implement this for lifetime strategies beyond the built-in
/// [`TransientPolicy`] and [`SingletonPolicy`], and attach it with
/// [`Annotation::custom`](crate::Annotation::custom).
pub trait RegistrationPolicy: Send + Sync + fmt::Debug {
    /// Explicit key override, if any.
    fn key(&self) -> Option<&Key>;

    fn lifetime(&self) -> Lifetime;

    /// Whether the resolver lands in the requesting scope rather than the root.
    fn register_in_child(&self) -> bool {
        false
    }

    /// Registers a resolver for `key` and returns it.
    ///
    /// # Arguments
    ///
    /// * `container` - The scope that is resolving the key
    /// * `key` - The key being resolved
    /// * `target` - The factory method or constructor declared for the key
    fn bind(&self, container: &Container, key: &Key, target: &Target) -> DiResult<Arc<dyn Resolver>>;
}

/// Registers a fresh value on every resolution.
#[derive(Debug, Clone, Default)]
pub struct TransientPolicy {
    key: Option<Key>,
}

impl TransientPolicy {
    pub fn new(key: Option<Key>) -> Self {
        Self { key }
    }
}

impl RegistrationPolicy for TransientPolicy {
    fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }

    fn bind(&self, container: &Container, key: &Key, target: &Target) -> DiResult<Arc<dyn Resolver>> {
        let key = self.key.clone().unwrap_or_else(|| key.clone());
        tracing::debug!(%key, "binding transient registration");
        match target {
            Target::Factory(descriptor) => {
                let resolver = FactoryResolver::new(key.clone(), descriptor.clone(), Lifetime::Transient);
                Ok(container.register_resolver(key, Arc::new(resolver)))
            }
            Target::Constructor(ctor) => Ok(container.register_transient(key, ctor.clone())),
        }
    }
}

/// Options for [`SingletonPolicy`].
///
/// A bare `bool` converts into the flag alone, a bare [`Key`] into the
/// override alone, and a `(Key, bool)` pair into both. Whatever is left
/// unspecified registers in the root scope.
///
/// ```rust
/// use ferrous_factory::{Key, SingletonOptions};
///
/// assert!(!SingletonOptions::default().register_in_child);
///
/// let flag_only = SingletonOptions::from(true);
/// assert!(flag_only.key.is_none());
/// assert!(flag_only.register_in_child);
///
/// let key_only = SingletonOptions::from(Key::named("logger"));
/// assert_eq!(key_only.key, Some(Key::named("logger")));
/// assert!(!key_only.register_in_child);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingletonOptions {
    pub key: Option<Key>,
    pub register_in_child: bool,
}

impl From<()> for SingletonOptions {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<bool> for SingletonOptions {
    fn from(register_in_child: bool) -> Self {
        Self {
            key: None,
            register_in_child,
        }
    }
}

impl From<Key> for SingletonOptions {
    fn from(key: Key) -> Self {
        Self {
            key: Some(key),
            register_in_child: false,
        }
    }
}

impl From<(Key, bool)> for SingletonOptions {
    fn from((key, register_in_child): (Key, bool)) -> Self {
        Self {
            key: Some(key),
            register_in_child,
        }
    }
}

/// Registers one value, computed on first resolution and cached forever.
#[derive(Debug, Clone, Default)]
pub struct SingletonPolicy {
    options: SingletonOptions,
}

impl SingletonPolicy {
    pub fn new(options: impl Into<SingletonOptions>) -> Self {
        Self {
            options: options.into(),
        }
    }

    pub fn options(&self) -> &SingletonOptions {
        &self.options
    }
}

impl RegistrationPolicy for SingletonPolicy {
    fn key(&self) -> Option<&Key> {
        self.options.key.as_ref()
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Singleton
    }

    fn register_in_child(&self) -> bool {
        self.options.register_in_child
    }

    fn bind(&self, container: &Container, key: &Key, target: &Target) -> DiResult<Arc<dyn Resolver>> {
        let key = self.options.key.clone().unwrap_or_else(|| key.clone());
        let scope = if self.options.register_in_child {
            container.clone()
        } else {
            container.root()
        };
        tracing::debug!(%key, in_child = self.options.register_in_child, "binding singleton registration");
        match target {
            Target::Factory(descriptor) => {
                let resolver = FactoryResolver::new(key.clone(), descriptor.clone(), Lifetime::Singleton);
                Ok(scope.register_resolver(key, Arc::new(resolver)))
            }
            Target::Constructor(ctor) => Ok(scope.register_singleton(key, ctor.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_defaults_to_root() {
        let policy = SingletonPolicy::default();
        assert!(!policy.register_in_child());
        assert!(policy.key().is_none());
        assert_eq!(policy.lifetime(), Lifetime::Singleton);
    }

    #[test]
    fn test_singleton_overloads() {
        let key = Key::symbol("logger");

        let flag = SingletonPolicy::new(true);
        assert!(flag.register_in_child());
        assert!(flag.key().is_none());

        let keyed = SingletonPolicy::new(key.clone());
        assert!(!keyed.register_in_child());
        assert_eq!(keyed.key(), Some(&key));

        let both = SingletonPolicy::new((key.clone(), true));
        assert!(both.register_in_child());
        assert_eq!(both.key(), Some(&key));

        let unit = SingletonPolicy::new(());
        assert_eq!(unit.options(), &SingletonOptions::default());
    }

    #[test]
    fn test_transient_key_override() {
        let policy = TransientPolicy::new(Some(Key::named("conn")));
        assert_eq!(policy.key(), Some(&Key::named("conn")));
        assert_eq!(policy.lifetime(), Lifetime::Transient);
        assert!(!policy.register_in_child());
    }
}
