/// Property-based tests for factory method resolution
///
/// These tests verify that lifetimes behave the same regardless of how many
/// resolutions happen or how deep the requesting scope is.

use ferrous_factory::{singleton, transient, Container, DiResult, Injectable, ServiceCollection};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Config;
impl Injectable for Config {
    fn construct(_: &Container) -> DiResult<Self> {
        Ok(Config)
    }
}

#[derive(Debug)]
struct ServiceA {
    value: String,
}

fn build(annotation: ferrous_factory::Annotation, value: String, calls: Arc<AtomicUsize>) -> Container {
    let mut services = ServiceCollection::new();
    services
        .configuration::<Config>()
        .factory("service_a", annotation, move |_: &Config| -> DiResult<ServiceA> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(ServiceA { value: value.clone() })
        });
    services.build()
}

fn descend(root: &Container, depth: usize) -> Container {
    (0..depth).fold(root.clone(), |scope, _| scope.create_child())
}

// Property: N transient resolutions invoke the factory N times
proptest! {
    #[test]
    fn transient_invocation_count(resolutions in 1usize..32, service_value in "\\PC{0,20}") {
        let calls = Arc::new(AtomicUsize::new(0));
        let container = build(transient(), service_value.clone(), calls.clone());

        let resolved: Vec<Arc<ServiceA>> = (0..resolutions)
            .map(|_| container.get::<ServiceA>().unwrap())
            .collect();

        prop_assert_eq!(calls.load(Ordering::SeqCst), resolutions);
        for window in resolved.windows(2) {
            prop_assert!(!Arc::ptr_eq(&window[0], &window[1]));
        }
        for service in &resolved {
            prop_assert_eq!(&service.value, &service_value);
        }
    }
}

// Property: a root singleton is one instance from any scope depth, in any order
proptest! {
    #[test]
    fn singleton_identity_across_depths(depths in prop::collection::vec(0usize..6, 1..8)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let root = build(singleton(), "shared".to_string(), calls.clone());

        let resolved: Vec<Arc<ServiceA>> = depths
            .iter()
            .map(|&depth| descend(&root, depth).get::<ServiceA>().unwrap())
            .collect();

        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        for service in &resolved[1..] {
            prop_assert!(Arc::ptr_eq(&resolved[0], service));
        }
    }
}

// Property: child-scoped singletons are one instance per scope
proptest! {
    #[test]
    fn child_singleton_per_scope(scopes in 1usize..8, per_scope in 1usize..4) {
        let calls = Arc::new(AtomicUsize::new(0));
        let root = build(ferrous_factory::singleton_with(true), "scoped".to_string(), calls.clone());

        for _ in 0..scopes {
            let child = root.create_child();
            let first = child.get::<ServiceA>().unwrap();
            for _ in 1..per_scope {
                prop_assert!(Arc::ptr_eq(&first, &child.get::<ServiceA>().unwrap()));
            }
        }

        prop_assert_eq!(calls.load(Ordering::SeqCst), scopes);
    }
}
