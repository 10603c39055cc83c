/// Tests for metadata providers and custom registration policies

use ferrous_factory::{
    transient_as, AnyArc, Annotation, Container, DiError, DiResult, Injectable, Key, Lifetime, RegistrationPolicy,
    Resolver, ServiceCollection, SignatureTable, Target, TypeMetadataProvider,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Logger(&'static str);
struct Connection(&'static str);

struct Config;
impl Injectable for Config {
    fn construct(_: &Container) -> DiResult<Self> {
        Ok(Config)
    }
}

fn connection_from_logger(_: &Config, args: &[AnyArc]) -> DiResult<AnyArc> {
    let logger = args
        .first()
        .cloned()
        .ok_or(DiError::NotFound("logger argument"))?
        .downcast::<Logger>()
        .map_err(|_| DiError::TypeMismatch("Logger"))?;
    Ok(Arc::new(Connection(logger.0)))
}

#[test]
fn test_external_provider_supplies_key_and_parameters() {
    let table = SignatureTable::new()
        .with_method(Key::of::<Config>(), "get_logger", vec![], Some(Key::of::<Logger>()))
        .with_method(
            Key::of::<Config>(),
            "get_connection",
            vec![Key::of::<Logger>()],
            Some(Key::of::<Connection>()),
        );

    let mut services = ServiceCollection::new();
    services.add_metadata_provider(Arc::new(table));
    services
        .configuration::<Config>()
        .erased_factory("get_logger", ferrous_factory::singleton(), |_: &Config, _: &[AnyArc]| -> DiResult<AnyArc> {
            Ok(Arc::new(Logger("external")))
        })
        .unwrap()
        .erased_factory("get_connection", ferrous_factory::singleton(), connection_from_logger)
        .unwrap();

    let container = services.build();
    assert_eq!(container.get::<Connection>().unwrap().0, "external");
}

#[test]
fn test_parameters_looked_up_by_owner_not_key() {
    // the provider only knows the method under its defining type
    let table = SignatureTable::new().with_method(Key::of::<Config>(), "get_connection", vec![Key::of::<Logger>()], None);

    let mut services = ServiceCollection::new();
    services.add_metadata_provider(Arc::new(table));
    services
        .configuration::<Config>()
        .factory("get_logger", ferrous_factory::singleton(), |_: &Config| -> DiResult<Logger> {
            Ok(Logger("typed"))
        })
        .erased_factory("get_connection", transient_as(Key::named("conn")), connection_from_logger)
        .unwrap();

    let container = services.build();
    assert_eq!(container.get_by::<Connection>(&Key::named("conn")).unwrap().0, "typed");
}

#[test]
fn test_unknown_parameters_mean_zero_arguments() {
    let mut services = ServiceCollection::new();
    services
        .configuration::<Config>()
        .erased_factory("get_connection", transient_as(Key::named("conn")), connection_from_logger)
        .unwrap();

    let container = services.build();
    assert!(matches!(
        container.get_by::<Connection>(&Key::named("conn")),
        Err(DiError::NotFound("logger argument"))
    ));
}

#[test]
fn test_metadata_visible_from_container() {
    let mut services = ServiceCollection::new();
    services
        .configuration::<Config>()
        .factory("get_connection", ferrous_factory::singleton(), |_: &Config, l: Arc<Logger>| -> DiResult<Connection> {
            Ok(Connection(l.0))
        });

    let container = services.build();
    let metadata = container.metadata();
    assert_eq!(metadata.parameter_types_of(&Key::of::<Config>(), "get_connection"), vec![Key::of::<Logger>()]);
    assert_eq!(metadata.return_type_of(&Key::of::<Config>(), "get_connection"), Some(Key::of::<Connection>()));
}

// ===== Custom policy =====

/// Registers a transient resolver and counts binds.
#[derive(Debug)]
struct CountingPolicy {
    binds: Arc<AtomicUsize>,
}

impl RegistrationPolicy for CountingPolicy {
    fn key(&self) -> Option<&Key> {
        None
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }

    fn bind(&self, container: &Container, key: &Key, target: &Target) -> DiResult<Arc<dyn Resolver>> {
        self.binds.fetch_add(1, Ordering::SeqCst);
        ferrous_factory::TransientPolicy::default().bind(container, key, target)
    }
}

#[test]
fn test_custom_policy_binds_once_per_scope() {
    let binds = Arc::new(AtomicUsize::new(0));
    let annotation = Annotation::custom(CountingPolicy { binds: binds.clone() });
    let mut services = ServiceCollection::new();
    services
        .configuration::<Config>()
        .factory("get_logger", annotation, |_: &Config| -> DiResult<Logger> { Ok(Logger("custom")) });

    let root = services.build();
    let child = root.create_child();
    root.get::<Logger>().unwrap();
    root.get::<Logger>().unwrap();
    child.get::<Logger>().unwrap();

    assert_eq!(root.get::<Logger>().unwrap().0, "custom");
    // once on demand in the root, once more in the child
    assert_eq!(binds.load(Ordering::SeqCst), 2);
    assert!(child.has_resolver(&Key::of::<Logger>(), false));
}
