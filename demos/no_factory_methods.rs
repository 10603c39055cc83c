/// Example: The same application without factory methods
///
/// Here the configuration type registers `Logger` by hand from its
/// constructor, so it must be resolved before anything needs a `Logger`.

use ferrous_factory::{Constructor, Container, DiResult, Injectable, Key, ServiceCollection};
use std::fmt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger")
    }
}

pub struct Config;

impl Injectable for Config {
    fn construct(container: &Container) -> DiResult<Self> {
        container.register_singleton(Key::of::<Logger>(), Constructor::new(|_| Ok(Logger)));
        Ok(Config)
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

fn main() -> DiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut services = ServiceCollection::new();
    services.add_injectable::<Config>().add_injectable::<App>();

    let container = services.build();
    container.get::<Config>()?;
    let app = container.get::<App>()?;

    println!("Type of Logger is: {}", app.logger);
    Ok(())
}
