//! Type metadata for factory methods.
//!
//! The resolver never inspects a factory to learn what it needs. It asks a
//! [`TypeMetadataProvider`] for the declared parameter types of
//! `(owner, method)` and, at declaration time, for the declared return type.
//! Typed factory declarations record their signature in a [`SignatureTable`]
//! automatically; additional providers can be layered in front of it with
//! [`ServiceCollection::add_metadata_provider`](crate::ServiceCollection::add_metadata_provider).

use std::collections::HashMap;
use std::sync::Arc;

use crate::key::Key;

/// Source of declared parameter and return types for factory methods.
pub trait TypeMetadataProvider: Send + Sync {
    /// Ordered parameter types of `method` on `owner`, or an empty list if unknown.
    fn parameter_types_of(&self, owner: &Key, method: &'static str) -> Vec<Key>;

    /// Declared return type of `method` on `owner`, if known.
    fn return_type_of(&self, _owner: &Key, _method: &'static str) -> Option<Key> {
        None
    }
}

/// Declared signature of one factory method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<Key>,
    pub returns: Option<Key>,
}

/// In-memory signature store keyed by `(owner, method)`.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{Key, SignatureTable, TypeMetadataProvider};
///
/// struct Config;
/// struct Logger;
/// struct Connection;
///
/// let table = SignatureTable::new()
///     .with_method(Key::of::<Config>(), "get_connection", vec![Key::of::<Logger>()], Some(Key::of::<Connection>()));
///
/// assert_eq!(table.parameter_types_of(&Key::of::<Config>(), "get_connection"), vec![Key::of::<Logger>()]);
/// assert_eq!(table.return_type_of(&Key::of::<Config>(), "get_connection"), Some(Key::of::<Connection>()));
/// assert!(table.parameter_types_of(&Key::of::<Config>(), "unknown").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    entries: HashMap<(Key, &'static str), Signature>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`record`](Self::record).
    pub fn with_method(
        mut self,
        owner: Key,
        method: &'static str,
        parameters: Vec<Key>,
        returns: Option<Key>,
    ) -> Self {
        self.record(owner, method, Signature { parameters, returns });
        self
    }

    /// Stores the signature of `method` on `owner`, replacing any previous one.
    pub fn record(&mut self, owner: Key, method: &'static str, signature: Signature) {
        self.entries.insert((owner, method), signature);
    }

    pub fn signature(&self, owner: &Key, method: &'static str) -> Option<&Signature> {
        self.entries.get(&(owner.clone(), method))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeMetadataProvider for SignatureTable {
    fn parameter_types_of(&self, owner: &Key, method: &'static str) -> Vec<Key> {
        self.signature(owner, method)
            .map(|s| s.parameters.clone())
            .unwrap_or_default()
    }

    fn return_type_of(&self, owner: &Key, method: &'static str) -> Option<Key> {
        self.signature(owner, method).and_then(|s| s.returns.clone())
    }
}

/// Ordered list of providers; the first one with an answer wins.
#[derive(Clone, Default)]
pub(crate) struct MetadataChain {
    providers: Vec<Arc<dyn TypeMetadataProvider>>,
}

impl MetadataChain {
    pub(crate) fn new(providers: Vec<Arc<dyn TypeMetadataProvider>>) -> Self {
        Self { providers }
    }
}

impl TypeMetadataProvider for MetadataChain {
    fn parameter_types_of(&self, owner: &Key, method: &'static str) -> Vec<Key> {
        self.providers
            .iter()
            .map(|p| p.parameter_types_of(owner, method))
            .find(|params| !params.is_empty())
            .unwrap_or_default()
    }

    fn return_type_of(&self, owner: &Key, method: &'static str) -> Option<Key> {
        self.providers
            .iter()
            .find_map(|p| p.return_type_of(owner, method))
    }
}
