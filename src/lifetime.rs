//! Lifetime policy definitions.

/// Lifetimes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{Container, Constructor, Key, Lifetime};
/// use std::sync::Arc;
///
/// struct Database;
///
/// let container = Container::new();
/// container.register_singleton(Key::of::<Database>(), Constructor::new(|_| Ok(Database)));
///
/// let a = container.get::<Database>().unwrap();
/// let b = container.get::<Database>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(Lifetime::Singleton.is_cached());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Lifetime {
    /// Computed once, cached forever in the scope that owns the resolver
    Singleton,
    /// Recomputed on every resolution, never cached
    Transient,
}

impl Lifetime {
    /// Whether a resolver with this lifetime keeps the first value it produces.
    pub fn is_cached(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}
