//! Constructor injection.

use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::error::DiResult;
use crate::traits::AnyArc;

/// Types the container can build by itself.
///
/// `construct` receives the requesting scope and resolves whatever the type
/// needs from it. Configuration types implement this too, which is how a
/// configuration object gets its own dependencies (including the container
/// handle) before any of its factory methods run.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{Container, DiResult, Injectable, ServiceCollection};
/// use std::sync::Arc;
///
/// struct Database { url: String }
///
/// impl Injectable for Database {
///     fn construct(_: &Container) -> DiResult<Self> {
///         Ok(Database { url: "postgres://localhost".to_string() })
///     }
/// }
///
/// struct UserService { db: Arc<Database> }
///
/// impl Injectable for UserService {
///     fn construct(container: &Container) -> DiResult<Self> {
///         Ok(UserService { db: container.get::<Database>()? })
///     }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_injectable::<Database>().add_injectable::<UserService>();
///
/// let container = services.build();
/// let users = container.get::<UserService>().unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    fn construct(container: &Container) -> DiResult<Self>;
}

type ConstructFn = dyn Fn(&Container) -> DiResult<AnyArc> + Send + Sync;

/// Type-erased constructor used by singleton and transient registrations.
#[derive(Clone)]
pub struct Constructor {
    name: &'static str,
    f: Arc<ConstructFn>,
}

impl Constructor {
    /// Wraps a closure producing `T`.
    pub fn new<T, F>(f: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            name: std::any::type_name::<T>(),
            f: Arc::new(move |c: &Container| -> DiResult<AnyArc> { Ok(Arc::new(f(c)?)) }),
        }
    }

    /// Constructor of an [`Injectable`] type.
    pub fn of<T: Injectable>() -> Self {
        Self::new(T::construct)
    }

    /// Wraps a closure that already produces an erased value.
    pub fn erased<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&Container) -> DiResult<AnyArc> + Send + Sync + 'static,
    {
        Self { name, f: Arc::new(f) }
    }

    /// Name of the produced type, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn construct(&self, container: &Container) -> DiResult<AnyArc> {
        (self.f)(container)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("name", &self.name).finish()
    }
}
