//! Built-in resolvers.

mod factory;
mod strategy;

pub use factory::FactoryResolver;
pub use strategy::StrategyResolver;

use crate::traits::AnyArc;

/// Cache slot of a compute-once resolver.
///
/// Moves from `Uncomputed` to `Computed` on the first successful resolution
/// and never back; a failed computation leaves it `Uncomputed`.
#[derive(Default)]
pub(crate) enum Slot {
    #[default]
    Uncomputed,
    Computed(AnyArc),
}

impl Slot {
    pub(crate) fn value(&self) -> Option<AnyArc> {
        match self {
            Slot::Uncomputed => None,
            Slot::Computed(value) => Some(value.clone()),
        }
    }

    /// Stores `value` unless a value is already present; returns the stored one.
    pub(crate) fn fill(&mut self, value: AnyArc) -> AnyArc {
        match self {
            Slot::Computed(existing) => existing.clone(),
            Slot::Uncomputed => {
                *self = Slot::Computed(value.clone());
                value
            }
        }
    }
}
