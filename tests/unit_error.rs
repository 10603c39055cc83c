/// Unit tests for DiError and DiResult types

use ferrous_factory::{DiError, DiResult};
use std::error::Error;

#[derive(Debug)]
struct Unreachable;

impl std::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("database unreachable")
    }
}

impl Error for Unreachable {}

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("TestService");
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Service not found: TestService");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("alloc::string::String");
    assert_eq!(error.to_string(), "Type mismatch for: alloc::string::String");
}

#[test]
fn test_error_display_circular() {
    let error = DiError::Circular(vec!["ServiceA", "ServiceB", "ServiceA"]);
    assert_eq!(error.to_string(), "Circular dependency: ServiceA -> ServiceB -> ServiceA");
}

#[test]
fn test_error_display_empty_circular_path() {
    let error = DiError::Circular(vec![]);
    // Should still show the prefix even with empty path
    assert_eq!(error.to_string(), "Circular dependency: ");
}

#[test]
fn test_error_display_depth_exceeded() {
    let error = DiError::DepthExceeded(100);
    assert_eq!(error.to_string(), "Max depth 100 exceeded");
}

#[test]
fn test_error_display_configuration() {
    let error = DiError::Configuration {
        owner: "app::Config",
        method: "get_logger",
        reason: "no resolvable key",
    };
    assert_eq!(error.to_string(), "Configuration error in app::Config::get_logger: no resolvable key");
}

#[test]
fn test_factory_error_keeps_source() {
    let error = DiError::factory(Unreachable);
    assert_eq!(error.to_string(), "Factory invocation failed: database unreachable");

    let source = error.source().expect("factory errors carry their source");
    assert_eq!(source.to_string(), "database unreachable");
}

#[test]
fn test_factory_message() {
    let error = DiError::factory_message(format!("retry in {}s", 5));
    assert_eq!(error.to_string(), "Factory invocation failed: retry in 5s");
}

#[test]
fn test_error_clone_shares_factory_source() {
    let error = DiError::factory(Unreachable);
    let cloned = error.clone();
    match (error, cloned) {
        (DiError::Factory(a), DiError::Factory(b)) => assert!(std::sync::Arc::ptr_eq(&a, &b)),
        _ => panic!("expected factory errors"),
    }
}

#[test]
fn test_diresult_err() {
    fn failing() -> DiResult<()> {
        Err(DiError::NotFound("some_service"))
    }

    match failing() {
        Err(DiError::NotFound(name)) => assert_eq!(name, "some_service"),
        _ => panic!("Expected NotFound error"),
    }
}
