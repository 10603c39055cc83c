//! Factory method declarations on a configuration type.

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::Arc;

use super::ServiceCollection;
use crate::annotations::{Annotation, FactoryMethod};
use crate::descriptors::{ErasedFactory, FactoryDescriptor, Inject};
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::metadata::Signature;
use crate::traits::{AnyArc, Injectable};

/// Declares factory methods of the configuration type `C`.
///
/// Obtained from [`ServiceCollection::configuration`]. Every declaration names
/// the method, the [`Annotation`] it carries, and the method body. At
/// resolution time the container first resolves the `C` instance, then the
/// method's dependencies, then invokes the body.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{singleton, transient, Container, DiResult, Injectable, ServiceCollection};
/// use std::sync::Arc;
///
/// struct Logger;
/// struct Connection { logger: Arc<Logger> }
///
/// struct Config;
/// impl Injectable for Config {
///     fn construct(_: &Container) -> DiResult<Self> { Ok(Config) }
/// }
///
/// let mut services = ServiceCollection::new();
/// services
///     .configuration::<Config>()
///     .factory("get_logger", singleton(), |_: &Config| -> DiResult<Logger> { Ok(Logger) })
///     .factory("get_connection", transient(), |_: &Config, logger: Arc<Logger>| -> DiResult<Connection> {
///         Ok(Connection { logger })
///     });
///
/// let container = services.build();
/// let a = container.get::<Connection>().unwrap();
/// let b = container.get::<Connection>().unwrap();
/// assert!(!Arc::ptr_eq(&a, &b));
/// assert!(Arc::ptr_eq(&a.logger, &b.logger));
/// ```
pub struct ConfigurationBuilder<'a, C> {
    services: &'a mut ServiceCollection,
    _config: PhantomData<fn() -> C>,
}

impl<'a, C: Injectable> ConfigurationBuilder<'a, C> {
    pub(crate) fn new(services: &'a mut ServiceCollection) -> Self {
        Self {
            services,
            _config: PhantomData,
        }
    }

    /// Declares a typed factory method.
    ///
    /// The closure's parameter types are recorded as the method's declared
    /// dependencies and its output type as the declared return type, which
    /// is the registration key unless the annotation overrides it.
    pub fn factory<F, Args>(&mut self, method: &'static str, annotation: Annotation, f: F) -> &mut Self
    where
        F: FactoryMethod<C, Args>,
        Args: 'static,
    {
        let descriptor = self.typed_descriptor(method, &annotation, f);
        let returns = Key::of::<<F as FactoryMethod<C, Args>>::Output>();
        self.services.declare_typed_factory(&annotation, descriptor, returns);
        self
    }

    /// Declares a typed factory method with an explicit dependency list.
    ///
    /// The list replaces the parameter types captured from the closure; it
    /// must still match the closure's parameters positionally.
    pub fn factory_with_inject<F, Args>(
        &mut self,
        method: &'static str,
        annotation: Annotation,
        inject: impl Into<Inject>,
        f: F,
    ) -> &mut Self
    where
        F: FactoryMethod<C, Args>,
        Args: 'static,
    {
        let descriptor = self.typed_descriptor(method, &annotation, f).with_inject(inject.into());
        let returns = Key::of::<<F as FactoryMethod<C, Args>>::Output>();
        self.services.declare_typed_factory(&annotation, descriptor, returns);
        self
    }

    /// Declares an untyped factory method.
    ///
    /// No signature is captured: the registration key must come from the
    /// annotation or from a metadata provider, and dependencies from a
    /// metadata provider.
    ///
    /// # Errors
    ///
    /// [`DiError::Configuration`] if no registration key can be determined.
    pub fn erased_factory<F>(&mut self, method: &'static str, annotation: Annotation, f: F) -> DiResult<&mut Self>
    where
        F: Fn(&C, &[AnyArc]) -> DiResult<AnyArc> + Send + Sync + 'static,
    {
        let descriptor = FactoryDescriptor::new(Key::of::<C>(), method, annotation.lifetime(), erase_config(f));
        self.services.declare_factory(&annotation, descriptor)?;
        Ok(self)
    }

    /// Untyped factory method with an explicit dependency list.
    pub fn erased_factory_with_inject<F>(
        &mut self,
        method: &'static str,
        annotation: Annotation,
        inject: impl Into<Inject>,
        f: F,
    ) -> DiResult<&mut Self>
    where
        F: Fn(&C, &[AnyArc]) -> DiResult<AnyArc> + Send + Sync + 'static,
    {
        let descriptor = FactoryDescriptor::new(Key::of::<C>(), method, annotation.lifetime(), erase_config(f))
            .with_inject(inject.into());
        self.services.declare_factory(&annotation, descriptor)?;
        Ok(self)
    }

    fn typed_descriptor<F, Args>(&mut self, method: &'static str, annotation: &Annotation, f: F) -> FactoryDescriptor
    where
        F: FactoryMethod<C, Args>,
        Args: 'static,
    {
        let owner = Key::of::<C>();
        self.services.record_signature(
            owner.clone(),
            method,
            Signature {
                parameters: <F as FactoryMethod<C, Args>>::parameter_types(),
                returns: Some(Key::of::<<F as FactoryMethod<C, Args>>::Output>()),
            },
        );

        let factory = erase_config(move |config: &C, args: &[AnyArc]| -> DiResult<AnyArc> {
            let value = FactoryMethod::<C, Args>::call(&f, config, args)?;
            Ok(Arc::new(value) as AnyArc)
        });
        FactoryDescriptor::new(owner, method, annotation.lifetime(), factory)
    }
}

fn erase_config<C, F>(f: F) -> ErasedFactory
where
    C: Send + Sync + 'static,
    F: Fn(&C, &[AnyArc]) -> DiResult<AnyArc> + Send + Sync + 'static,
{
    Arc::new(move |config: &AnyArc, args: &[AnyArc]| -> DiResult<AnyArc> {
        let config = (**config)
            .downcast_ref::<C>()
            .ok_or(DiError::TypeMismatch(type_name::<C>()))?;
        f(config, args)
    })
}
