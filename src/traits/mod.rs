//! Core traits for the dependency injection container.

mod injectable;
mod resolver;

pub use injectable::{Constructor, Injectable};
pub use resolver::{AnyArc, Resolver};
