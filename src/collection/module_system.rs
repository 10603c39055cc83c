//! Grouping declarations into reusable modules.

use crate::{DiResult, ServiceCollection};

/// A group of declarations applied to a [`ServiceCollection`] together.
///
/// A configuration type usually ships one module that declares all of its
/// factory methods, so callers only need a single `add_module`.
///
/// # Example
///
/// ```rust
/// use ferrous_factory::{singleton, Container, DiResult, Injectable, ServiceCollection, ServiceModule};
///
/// struct Logger;
///
/// struct LoggingConfig;
/// impl Injectable for LoggingConfig {
///     fn construct(_: &Container) -> DiResult<Self> { Ok(LoggingConfig) }
/// }
///
/// impl ServiceModule for LoggingConfig {
///     fn register_services(self, services: &mut ServiceCollection) -> DiResult<()> {
///         services
///             .configuration::<LoggingConfig>()
///             .factory("get_logger", singleton(), |_: &LoggingConfig| -> DiResult<Logger> { Ok(Logger) });
///         Ok(())
///     }
/// }
///
/// # fn main() -> DiResult<()> {
/// let mut services = ServiceCollection::new();
/// services.add_module(LoggingConfig)?;
/// let container = services.build();
/// let _logger = container.get::<Logger>()?;
/// # Ok(())
/// # }
/// ```
pub trait ServiceModule {
    /// Declares this module's services on the collection.
    fn register_services(self, services: &mut ServiceCollection) -> DiResult<()>;
}
