//! Registration key types for the dependency injection container.

use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(1);

/// Key for resolver storage and lookup.
///
/// Keys identify entries in a container scope. A key is either a type
/// reference, a string, or a symbol. Every key maps to at most one resolver
/// within a single scope.
///
/// # Key Types
///
/// - **Type**: Concrete types (structs, enums, primitives), compared by `TypeId`
/// - **Named**: String keys, compared by value
/// - **Symbol**: Unique tokens, compared by identity; two symbols with the same
///   description are different keys
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::Key;
///
/// struct Logger;
///
/// assert_eq!(Key::of::<Logger>(), Key::of::<Logger>());
/// assert_eq!(Key::named("hello"), Key::named("hello"));
///
/// let a = Key::symbol("logger");
/// let b = Key::symbol("logger");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Debug, Clone)]
pub enum Key {
    /// Concrete type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// String key
    Named(&'static str),
    /// Symbol key: process-unique id plus description
    Symbol(u64, &'static str),
}

impl Key {
    /// Type key for `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Key {
        Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// String key.
    pub fn named(name: &'static str) -> Key {
        Key::Named(name)
    }

    /// Allocates a fresh symbol key.
    ///
    /// Each call yields a key distinct from every other key, even one created
    /// with the same description.
    pub fn symbol(description: &'static str) -> Key {
        Key::Symbol(NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed), description)
    }

    /// Get the type name, string or symbol description for display
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_factory::Key;
    ///
    /// assert_eq!(Key::of::<String>().display_name(), "alloc::string::String");
    /// assert_eq!(Key::named("hello").display_name(), "hello");
    /// assert_eq!(Key::symbol("connection").display_name(), "connection");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::Named(name) => name,
            Key::Symbol(_, description) => description,
        }
    }

    /// Returns true for keys produced by [`Key::of`].
    pub fn is_type(&self) -> bool {
        matches!(self, Key::Type(_, _))
    }
}

impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // TypeId only, the name is diagnostic
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Named(a), Key::Named(b)) => a == b,
            (Key::Symbol(a, _), Key::Symbol(b, _)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::Named(name) => {
                1u8.hash(state);
                name.hash(state);
            }
            Key::Symbol(id, _) => {
                2u8.hash(state);
                id.hash(state);
            }
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Type(_, name) => write!(f, "{}", name),
            Key::Named(name) => write!(f, "\"{}\"", name),
            Key::Symbol(_, description) => write!(f, "Symbol({})", description),
        }
    }
}

// Helper function for creating type keys
#[inline(always)]
pub fn key_of_type<T: 'static>() -> Key {
    Key::of::<T>()
}
