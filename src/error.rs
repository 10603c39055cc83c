//! Error types for the dependency injection container.

use std::error::Error as StdError;
use std::sync::Arc;

/// Dependency injection errors
///
/// Represents the failures that can surface from declaring factory methods
/// or resolving keys. Every variant reaches the caller of
/// `Container::get` unchanged; nothing is retried or recovered internally.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{Container, DiError};
///
/// let container = Container::new();
/// match container.get::<String>() {
///     Err(DiError::NotFound(name)) => assert_eq!(name, "alloc::string::String"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_factory::DiError;
///
/// let circular = DiError::Circular(vec!["ServiceA", "ServiceB", "ServiceA"]);
/// assert_eq!(circular.to_string(), "Circular dependency: ServiceA -> ServiceB -> ServiceA");
///
/// let failed = DiError::factory_message("database unreachable");
/// assert_eq!(failed.to_string(), "Factory invocation failed: database unreachable");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiError {
    /// Nothing registered and nothing constructible under the key
    #[error("Service not found: {0}")]
    NotFound(&'static str),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<&'static str>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// A factory method could not be registered at declaration time
    #[error("Configuration error in {owner}::{method}: {reason}")]
    Configuration {
        owner: &'static str,
        method: &'static str,
        reason: &'static str,
    },
    /// Failure raised inside a factory body
    #[error("Factory invocation failed: {0}")]
    Factory(#[source] Arc<dyn StdError + Send + Sync>),
}

impl DiError {
    /// Wraps an error raised by a factory body.
    pub fn factory<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        DiError::Factory(Arc::new(error))
    }

    /// Factory failure carrying only a message.
    pub fn factory_message(message: impl Into<String>) -> Self {
        let boxed: Box<dyn StdError + Send + Sync> = message.into().into();
        DiError::Factory(Arc::from(boxed))
    }

    pub(crate) fn no_resolvable_key(owner: &'static str, method: &'static str) -> Self {
        DiError::Configuration {
            owner,
            method,
            reason: "no resolvable key",
        }
    }
}

/// Result type for DI operations
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{DiResult, DiError};
///
/// fn create_service() -> DiResult<String> {
///     Ok("service created".to_string())
/// }
///
/// fn failing_operation() -> DiResult<()> {
///     Err(DiError::NotFound("some_service"))
/// }
///
/// assert!(create_service().is_ok());
/// assert!(failing_operation().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
