//! Hook for handing native futures to a runtime.
//!
//! A [`Deferred`](crate::Deferred) needs something to poll a native future
//! (or a timer) on its behalf. Everything that does so goes through [`Spawn`],
//! and the `_on`-less constructors here and in `rail-interop` find their
//! runtime through [`ambient`], so the runtime dependency stays at this seam.

use futures_util::future::BoxFuture;
use tokio::runtime::Handle;

pub trait Spawn {
    /// Run `task` to completion in the background. The task is never joined.
    fn spawn_detached(&self, task: BoxFuture<'static, ()>);
}

impl Spawn for Handle {
    fn spawn_detached(&self, task: BoxFuture<'static, ()>) {
        drop(self.spawn(task));
    }
}

/// Handle of the runtime driving the current task.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
#[must_use]
pub fn ambient() -> Handle {
    Handle::current()
}
