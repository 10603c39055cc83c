//! Circular dependency detection infrastructure.

use std::cell::RefCell;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::traits::Resolver;

// Thread-local resolution stack for circular dependency detection
thread_local! {
    static RESOLUTION_TLS: RefCell<ResolutionTls> = RefCell::new(ResolutionTls::default());
}

/// A resolver invocation in progress: the resolver's address and the key it
/// was asked for.
type Frame = (usize, Key);

#[derive(Default)]
struct ResolutionTls {
    stack: Vec<Frame>,
}

fn resolver_id(resolver: &Arc<dyn Resolver>) -> usize {
    Arc::as_ptr(resolver) as *const () as usize
}

/// Guard for managing the thread-local resolution stack.
///
/// Entering pushes a frame for the resolver about to run; dropping the guard
/// pops it, on success and error paths alike. Only re-entering the same
/// resolver counts as a cycle, so the same key resolved by another scope's
/// resolver or by an unrelated container nests freely.
pub(crate) struct StackGuard {
    id: usize,
}

impl StackGuard {
    /// Pushes a frame for `resolver`, failing if it is already running on
    /// this thread.
    ///
    /// The error path lists the key of every frame on the stack followed by
    /// `key`, e.g. `["Connection", "Logger", "Connection"]`.
    pub(crate) fn enter(resolver: &Arc<dyn Resolver>, key: &Key, max_depth: usize) -> DiResult<Self> {
        let id = resolver_id(resolver);
        RESOLUTION_TLS.with(|tls| {
            let mut tls = tls.borrow_mut();

            // Circular detection BEFORE pushing the new frame
            if tls.stack.iter().any(|(running, _)| *running == id) {
                let mut path: Vec<&'static str> = tls.stack.iter().map(|(_, k)| k.display_name()).collect();
                path.push(key.display_name());
                return Err(DiError::Circular(path));
            }

            // Depth guard
            if tls.stack.len() >= max_depth {
                return Err(DiError::DepthExceeded(max_depth));
            }

            tls.stack.push((id, key.clone()));
            Ok(())
        })?;

        Ok(Self { id })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_TLS.with(|tls| {
            let mut tls = tls.borrow_mut();
            if let Some((last, _)) = tls.stack.pop() {
                debug_assert_eq!(last, self.id);
            }
        });
    }
}
