//! Declaration table: policies and targets attached to keys.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptors::FactoryDescriptor;
use crate::key::Key;
use crate::policy::{RegistrationPolicy, Target};
use crate::traits::Constructor;

/// A policy attached to a key, together with what it binds.
#[derive(Debug, Clone)]
pub(crate) struct Declaration {
    pub(crate) policy: Arc<dyn RegistrationPolicy>,
    pub(crate) target: Target,
}

impl Declaration {
    fn is_member(&self, owner: &Key, method: &'static str) -> bool {
        match &self.target {
            Target::Factory(d) => d.owner() == owner && d.method() == method,
            Target::Constructor(_) => false,
        }
    }
}

/// Out-of-band metadata built at declaration time, read-only once a
/// container is built from it.
#[derive(Default, Clone)]
pub(crate) struct Registry {
    declarations: HashMap<Key, Declaration>,
    /// (owner, method) -> key the method's declaration is attached to
    members: HashMap<(Key, &'static str), Key>,
    constructors: HashMap<Key, Constructor>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attaches a factory method declaration to `key`.
    ///
    /// Declaring the same (owner, method) again replaces the previous
    /// declaration; if it was attached to a different key, that attachment
    /// is dropped.
    pub(crate) fn declare_factory(
        &mut self,
        key: Key,
        policy: Arc<dyn RegistrationPolicy>,
        descriptor: FactoryDescriptor,
    ) {
        let owner = descriptor.owner().clone();
        let method = descriptor.method();

        if let Some(previous) = self.members.insert((owner.clone(), method), key.clone()) {
            if previous != key
                && self
                    .declarations
                    .get(&previous)
                    .is_some_and(|d| d.is_member(&owner, method))
            {
                tracing::debug!(%previous, %key, method, "factory method moved to a new key");
                self.declarations.remove(&previous);
            }
        }

        self.declarations.insert(
            key,
            Declaration {
                policy,
                target: Target::Factory(Arc::new(descriptor)),
            },
        );
    }

    /// Attaches a class-level policy to a constructible type.
    pub(crate) fn declare_type(&mut self, key: Key, policy: Arc<dyn RegistrationPolicy>, ctor: Constructor) {
        self.constructors.entry(key.clone()).or_insert_with(|| ctor.clone());
        self.declarations.insert(
            key,
            Declaration {
                policy,
                target: Target::Constructor(ctor),
            },
        );
    }

    pub(crate) fn add_constructor(&mut self, key: Key, ctor: Constructor) {
        self.constructors.insert(key, ctor);
    }

    pub(crate) fn declaration(&self, key: &Key) -> Option<&Declaration> {
        self.declarations.get(key)
    }

    pub(crate) fn constructor(&self, key: &Key) -> Option<&Constructor> {
        self.constructors.get(key)
    }

    pub(crate) fn declarations(&self) -> impl Iterator<Item = (&Key, &Declaration)> {
        self.declarations.iter()
    }

    pub(crate) fn constructors(&self) -> impl Iterator<Item = (&Key, &Constructor)> {
        self.constructors.iter()
    }
}
