//! Callback storage shared by both placement strategies.
//!
//! Parameters own the context registered with their callback. It is released
//! exactly once: when replaced, when cleared, or when the parameters are
//! dropped.

use std::any::Any;

use tracing::trace;

/// Opaque caller data handed back to a position callback.
pub type CallbackContext = Box<dyn Any + Send + Sync>;

/// A callback of type `F` plus the context it owns.
pub(crate) struct CallbackSlot<F: ?Sized> {
    /// Registered callback.
    callback: Option<Box<F>>,
    /// Context owned on behalf of the caller.
    context: Option<CallbackContext>,
}

impl<F: ?Sized> Default for CallbackSlot<F> {
    fn default() -> Self {
        Self {
            callback: None,
            context: None,
        }
    }
}

impl<F: ?Sized> CallbackSlot<F> {
    /// Install a new callback, releasing the previous context first.
    pub(crate) fn replace(&mut self, callback: Box<F>, context: Option<CallbackContext>) {
        self.release();
        self.callback = Some(callback);
        self.context = context;
    }

    /// Drop the callback and release the context. Idempotent.
    pub(crate) fn release(&mut self) {
        self.callback = None;
        if let Some(ctx) = self.context.take() {
            trace!("callback: releasing context");
            drop(ctx);
        }
    }

    /// Registered callback, if any.
    pub(crate) fn callback(&self) -> Option<&F> {
        self.callback.as_deref()
    }

    /// Registered context, if any.
    pub(crate) fn context(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.context.as_deref()
    }

    /// Whether a callback is registered.
    pub(crate) const fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    /// Whether a context is held.
    pub(crate) const fn has_context(&self) -> bool {
        self.context.is_some()
    }
}

impl<F: ?Sized> Drop for CallbackSlot<F> {
    fn drop(&mut self) {
        self.release();
    }
}
