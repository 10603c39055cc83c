/// Example: Factory methods on a configuration type
///
/// `Config` declares how a `Logger` is built. `App` only asks the container
/// for a `Logger`; the container finds the declaration, constructs `Config`,
/// and calls the method once.
///
/// Run with `RUST_LOG=debug` to see the registrations as they happen.

use ferrous_factory::{singleton, Container, DiResult, Injectable, LoggingObserver, ServiceCollection, ServiceModule};
use std::fmt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ===== Services =====

pub struct Logger;

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger")
    }
}

pub struct App {
    pub logger: Arc<Logger>,
}

impl Injectable for App {
    fn construct(container: &Container) -> DiResult<Self> {
        Ok(App {
            logger: container.get::<Logger>()?,
        })
    }
}

// ===== Configuration =====

pub struct Config;

impl Injectable for Config {
    fn construct(_: &Container) -> DiResult<Self> {
        Ok(Config)
    }
}

impl Config {
    fn get_logger(&self) -> DiResult<Logger> {
        Ok(Logger)
    }
}

impl ServiceModule for Config {
    fn register_services(self, services: &mut ServiceCollection) -> DiResult<()> {
        services
            .configuration::<Config>()
            .factory("get_logger", singleton(), |config: &Config| -> DiResult<Logger> { config.get_logger() });
        Ok(())
    }
}

fn main() -> DiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut services = ServiceCollection::new();
    services.add_observer(Arc::new(LoggingObserver::new()));
    services.add_injectable::<App>();
    services.add_module(Config)?;

    let container = services.build();
    let app = container.get::<App>()?;

    println!("Type of Logger is: {}", app.logger);
    Ok(())
}
