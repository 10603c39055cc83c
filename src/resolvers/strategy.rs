//! Resolvers behind the container's plain registration methods.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Slot;
use crate::container::Container;
use crate::error::DiResult;
use crate::key::Key;
use crate::traits::{AnyArc, Constructor, Resolver};

pub(crate) type Handler = Arc<dyn Fn(&Container, &Key) -> DiResult<AnyArc> + Send + Sync>;

enum Strategy {
    Instance(AnyArc),
    Singleton(Constructor, Mutex<Slot>),
    Transient(Constructor),
    Handler(Handler),
}

/// Resolver for instances, constructors and handler closures.
pub struct StrategyResolver {
    strategy: Strategy,
}

impl StrategyResolver {
    pub fn instance(value: AnyArc) -> Self {
        Self {
            strategy: Strategy::Instance(value),
        }
    }

    pub fn singleton(ctor: Constructor) -> Self {
        Self {
            strategy: Strategy::Singleton(ctor, Mutex::new(Slot::Uncomputed)),
        }
    }

    pub fn transient(ctor: Constructor) -> Self {
        Self {
            strategy: Strategy::Transient(ctor),
        }
    }

    pub(crate) fn handler(handler: Handler) -> Self {
        Self {
            strategy: Strategy::Handler(handler),
        }
    }
}

impl Resolver for StrategyResolver {
    fn get(&self, container: &Container, key: &Key) -> DiResult<AnyArc> {
        match &self.strategy {
            Strategy::Instance(value) => Ok(value.clone()),
            Strategy::Singleton(ctor, slot) => {
                let cached = slot.lock().value();
                if let Some(value) = cached {
                    return Ok(value);
                }
                let value = ctor.construct(container)?;
                Ok(slot.lock().fill(value))
            }
            Strategy::Transient(ctor) => ctor.construct(container),
            Strategy::Handler(handler) => handler(container, key),
        }
    }
}
