//! The resolver contract.

use std::any::Any;
use std::sync::Arc;

use crate::container::Container;
use crate::error::DiResult;
use crate::key::Key;

/// Type-erased shared value, as stored and returned by resolvers.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Produces the value registered under a key, on demand.
///
/// A container scope stores one resolver per key and calls [`get`](Self::get)
/// with itself (the requesting scope) every time the key is resolved. The
/// resolver decides whether to cache, construct, or delegate.
///
/// Custom resolvers can be registered with
/// [`Container::register_resolver`](crate::Container::register_resolver):
///
/// ```
/// use ferrous_factory::{AnyArc, Container, DiResult, Key, Resolver};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// struct Sequence(AtomicU32);
///
/// impl Resolver for Sequence {
///     fn get(&self, _container: &Container, _key: &Key) -> DiResult<AnyArc> {
///         Ok(Arc::new(self.0.fetch_add(1, Ordering::SeqCst)))
///     }
/// }
///
/// let container = Container::new();
/// let key = Key::named("sequence");
/// container.register_resolver(key.clone(), Arc::new(Sequence(AtomicU32::new(0))));
///
/// assert_eq!(*container.get_by::<u32>(&key).unwrap(), 0);
/// assert_eq!(*container.get_by::<u32>(&key).unwrap(), 1);
/// ```
pub trait Resolver: Send + Sync {
    /// Produces the value for `key` on behalf of `container`.
    fn get(&self, container: &Container, key: &Key) -> DiResult<AnyArc>;
}
