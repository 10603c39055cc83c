//! Diagnostic observers for resolution traceability.
//!
//! Observers receive a callback around every key resolved through
//! [`Container::get_key`](crate::Container::get_key). They run synchronously
//! inside resolution, so keep implementations light.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::Key;

/// Observer trait for resolution events.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{DiError, DiObserver, Key, ServiceCollection};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct CountingObserver {
///     resolved: AtomicUsize,
/// }
///
/// impl DiObserver for CountingObserver {
///     fn resolving(&self, _key: &Key) {}
///
///     fn resolved(&self, _key: &Key, _duration: Duration) {
///         self.resolved.fetch_add(1, Ordering::SeqCst);
///     }
///
///     fn factory_failed(&self, _key: &Key, _error: &DiError) {}
/// }
///
/// let observer = Arc::new(CountingObserver::default());
/// let mut services = ServiceCollection::new();
/// services.add_observer(observer.clone());
///
/// let container = services.build();
/// container.register_instance(Key::named("port"), 8080u16);
/// let _ = container.get_by::<u16>(&Key::named("port")).unwrap();
/// assert_eq!(observer.resolved.load(Ordering::SeqCst), 1);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a key is resolved.
    fn resolving(&self, key: &Key);

    /// Called after a key resolved successfully.
    ///
    /// # Arguments
    ///
    /// * `key` - The key that was resolved
    /// * `duration` - Time elapsed from `resolving` to `resolved`
    fn resolved(&self, key: &Key, duration: Duration);

    /// Called when resolution of a key failed. The error still propagates
    /// to the caller afterwards.
    fn factory_failed(&self, key: &Key, error: &DiError);
}

/// Observers registered on a collection, shared by every scope built from it.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    #[inline]
    pub(crate) fn factory_failed(&self, key: &Key, error: &DiError) {
        for observer in &self.observers {
            observer.factory_failed(key, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Resolutions are emitted at `DEBUG`, failures at `WARN`, all under the
/// `ferrous_factory::observer` target.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{ServiceCollection, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut services = ServiceCollection::new();
/// services.add_observer(Arc::new(LoggingObserver::new()));
/// let _container = services.build();
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "ferrous-factory".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        tracing::debug!(target: "ferrous_factory::observer", prefix = %self.prefix, %key, "resolving");
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        tracing::debug!(
            target: "ferrous_factory::observer",
            prefix = %self.prefix,
            %key,
            elapsed_us = duration.as_micros() as u64,
            "resolved"
        );
    }

    fn factory_failed(&self, key: &Key, error: &DiError) {
        tracing::warn!(target: "ferrous_factory::observer", prefix = %self.prefix, %key, %error, "resolution failed");
    }
}
