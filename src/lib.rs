//! # ferrous-factory
//!
//! Dependency injection with factory methods: a method on a *configuration*
//! type produces a service, the container resolves that method's own
//! dependencies, and a declared lifetime decides whether the result is cached.
//!
//! ## Features
//!
//! - **Factory methods**: Declare how a service is built on a configuration type
//! - **Lifetimes**: Singleton (computed once) and Transient (computed every time)
//! - **Key overrides**: Register under a name or symbol instead of the return type
//! - **Hierarchical scopes**: Root singletons shared by every child, or per-child singletons
//! - **Circular dependency detection**: Cycles fail with the full resolution path
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_factory::{singleton, transient, Container, DiResult, Injectable, ServiceCollection};
//! use std::sync::Arc;
//!
//! struct Logger;
//! struct Connection {
//!     logger: Arc<Logger>,
//! }
//!
//! // The configuration type the factory methods live on
//! struct Config;
//! impl Injectable for Config {
//!     fn construct(_: &Container) -> DiResult<Self> {
//!         Ok(Config)
//!     }
//! }
//!
//! let mut services = ServiceCollection::new();
//! services
//!     .configuration::<Config>()
//!     .factory("get_logger", singleton(), |_: &Config| -> DiResult<Logger> { Ok(Logger) })
//!     .factory("get_connection", transient(), |_: &Config, logger: Arc<Logger>| -> DiResult<Connection> {
//!         Ok(Connection { logger })
//!     });
//!
//! let container = services.build();
//! let connection = container.get::<Connection>().unwrap();
//! assert!(Arc::ptr_eq(&connection.logger, &container.get::<Logger>().unwrap()));
//! ```
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: Created once; registered in the root scope unless declared
//!   with `singleton_with(true)`, which gives each requesting child its own
//! - **Transient**: Created fresh on every resolution
//!
//! ## Key Overrides
//!
//! ```rust
//! use ferrous_factory::{singleton_with, Container, DiError, DiResult, Injectable, Key, ServiceCollection};
//!
//! struct Logger(&'static str);
//!
//! struct Config;
//! impl Injectable for Config {
//!     fn construct(_: &Container) -> DiResult<Self> { Ok(Config) }
//! }
//!
//! let audit = Key::symbol("audit-logger");
//! let mut services = ServiceCollection::new();
//! services
//!     .configuration::<Config>()
//!     .factory("audit_logger", singleton_with(audit.clone()), |_: &Config| -> DiResult<Logger> {
//!         Ok(Logger("audit"))
//!     });
//!
//! let container = services.build();
//! assert_eq!(container.get_by::<Logger>(&audit).unwrap().0, "audit");
//! // nothing is registered under the return type
//! assert!(matches!(container.get::<Logger>(), Err(DiError::NotFound(_))));
//! ```

// Module declarations
pub mod annotations;
pub mod collection;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod metadata;
pub mod observer;
pub mod options;
pub mod policy;
pub mod resolvers;
pub mod traits;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use annotations::{singleton, singleton_with, transient, transient_as, Annotation, FactoryMethod};
pub use collection::{ConfigurationBuilder, ServiceCollection, ServiceModule};
pub use container::Container;
pub use descriptors::{ErasedFactory, FactoryDescriptor, Inject, ServiceDescriptor};
pub use error::{DiError, DiResult};
pub use key::{key_of_type, Key};
pub use lifetime::Lifetime;
pub use metadata::{Signature, SignatureTable, TypeMetadataProvider};
pub use observer::{DiObserver, LoggingObserver};
pub use options::ContainerOptions;
pub use policy::{RegistrationPolicy, SingletonOptions, SingletonPolicy, Target, TransientPolicy};
pub use resolvers::{FactoryResolver, StrategyResolver};
pub use traits::{AnyArc, Constructor, Injectable, Resolver};
