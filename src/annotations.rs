//! Declarative registration markers for factory methods.
//!
//! An [`Annotation`] is the lifetime policy a configuration method is
//! declared with. Apply it through
//! [`ConfigurationBuilder::factory`](crate::ConfigurationBuilder::factory) or,
//! for a whole type, [`ServiceCollection::annotate_type`](crate::ServiceCollection::annotate_type).

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::policy::{RegistrationPolicy, SingletonOptions, SingletonPolicy, TransientPolicy};
use crate::traits::AnyArc;

/// A registration policy waiting to be attached to a declaration.
#[derive(Debug, Clone)]
pub struct Annotation {
    policy: Arc<dyn RegistrationPolicy>,
}

impl Annotation {
    /// Wraps a custom policy.
    pub fn custom(policy: impl RegistrationPolicy + 'static) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    pub fn key(&self) -> Option<&Key> {
        self.policy.key()
    }

    pub fn lifetime(&self) -> Lifetime {
        self.policy.lifetime()
    }

    pub(crate) fn policy(&self) -> Arc<dyn RegistrationPolicy> {
        self.policy.clone()
    }
}

/// Transient registration under the method's return type.
pub fn transient() -> Annotation {
    Annotation::custom(TransientPolicy::new(None))
}

/// Transient registration under an explicit key.
pub fn transient_as(key: Key) -> Annotation {
    Annotation::custom(TransientPolicy::new(Some(key)))
}

/// Singleton registered in the root scope under the method's return type.
pub fn singleton() -> Annotation {
    Annotation::custom(SingletonPolicy::default())
}

/// Singleton with options: `true` registers in the requesting child scope,
/// a [`Key`] overrides the key, `(Key, bool)` does both.
///
/// ```rust
/// use ferrous_factory::{singleton_with, Key, Lifetime};
///
/// let logger = Key::symbol("logger");
/// let annotation = singleton_with(logger.clone());
/// assert_eq!(annotation.key(), Some(&logger));
/// assert_eq!(annotation.lifetime(), Lifetime::Singleton);
///
/// assert!(singleton_with(true).key().is_none());
/// ```
pub fn singleton_with(options: impl Into<SingletonOptions>) -> Annotation {
    Annotation::custom(SingletonPolicy::new(options))
}

/// A configuration method usable as a typed factory.
///
/// Implemented for closures and functions of the form
/// `Fn(&C, Arc<A1>, .., Arc<An>) -> DiResult<T>` with up to eight
/// dependencies. The parameter types become the method's declared
/// parameter metadata and `T` its declared return type.
pub trait FactoryMethod<C, Args>: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    /// Declared parameter types, in order.
    fn parameter_types() -> Vec<Key>;

    /// Invokes the method with positional, type-erased dependencies.
    fn call(&self, config: &C, args: &[AnyArc]) -> DiResult<Self::Output>;
}

fn downcast_arg<A: Send + Sync + 'static>(arg: Option<&AnyArc>) -> DiResult<Arc<A>> {
    arg.cloned()
        .ok_or(DiError::NotFound(std::any::type_name::<A>()))?
        .downcast::<A>()
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<A>()))
}

macro_rules! impl_factory_method {
    ($($arg:ident),*) => {
        impl<F, C, T, $($arg,)*> FactoryMethod<C, ($($arg,)*)> for F
        where
            F: Fn(&C, $(Arc<$arg>,)*) -> DiResult<T> + Send + Sync + 'static,
            C: 'static,
            T: Send + Sync + 'static,
            $($arg: Send + Sync + 'static,)*
        {
            type Output = T;

            fn parameter_types() -> Vec<Key> {
                vec![$(Key::of::<$arg>(),)*]
            }

            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn call(&self, config: &C, args: &[AnyArc]) -> DiResult<T> {
                let mut args = args.iter();
                $(let $arg = downcast_arg::<$arg>(args.next())?;)*
                (self)(config, $($arg,)*)
            }
        }
    };
}

impl_factory_method!();
impl_factory_method!(A1);
impl_factory_method!(A1, A2);
impl_factory_method!(A1, A2, A3);
impl_factory_method!(A1, A2, A3, A4);
impl_factory_method!(A1, A2, A3, A4, A5);
impl_factory_method!(A1, A2, A3, A4, A5, A6);
impl_factory_method!(A1, A2, A3, A4, A5, A6, A7);
impl_factory_method!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;

    struct Config;
    struct Logger(&'static str);
    struct Connection;

    fn arity<F, Args>(_: &F) -> Vec<Key>
    where
        F: FactoryMethod<Config, Args>,
    {
        F::parameter_types()
    }

    #[test]
    fn test_parameter_types_follow_declaration_order() {
        let f = |_: &Config, _: Arc<Logger>, _: Arc<Connection>| -> DiResult<u8> { Ok(0) };
        assert_eq!(arity(&f), vec![Key::of::<Logger>(), Key::of::<Connection>()]);

        let g = |_: &Config, _: Arc<Connection>, _: Arc<Logger>| -> DiResult<u8> { Ok(0) };
        assert_eq!(arity(&g), vec![Key::of::<Connection>(), Key::of::<Logger>()]);

        let h = |_: &Config| -> DiResult<u8> { Ok(0) };
        assert!(arity(&h).is_empty());
    }

    #[test]
    fn test_call_downcasts_positionally() {
        let f = |_: &Config, logger: Arc<Logger>| -> DiResult<&'static str> { Ok(logger.0) };
        let args: Vec<AnyArc> = vec![Arc::new(Logger("main"))];
        assert_eq!(FactoryMethod::<Config, (Logger,)>::call(&f, &Config, &args).unwrap(), "main");

        let wrong: Vec<AnyArc> = vec![Arc::new(Connection)];
        assert!(matches!(
            FactoryMethod::<Config, (Logger,)>::call(&f, &Config, &wrong),
            Err(DiError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_annotation_lifetimes() {
        assert_eq!(transient().lifetime(), Lifetime::Transient);
        assert_eq!(singleton().lifetime(), Lifetime::Singleton);
        assert_eq!(transient_as(Key::named("x")).key(), Some(&Key::named("x")));
        assert!(singleton().key().is_none());
    }
}
