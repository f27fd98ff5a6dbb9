//! Single-assignment cell backing every [`Deferred`](crate::Deferred).
//!
//! # State machine
//!
//! ```text
//! Pending(listener?) --settle(v)--> Settled(Some(v))   value parked for the consumer
//! Pending(cont)      --settle(v)--> Settled(None)      value handed to the continuation
//! Settled(_)         --settle(v)--> Settled(_)         rejected, v handed back
//! ```
//!
//! `settle` is the only transition out of `Pending`. The lock is released
//! before a waker or continuation runs, so user code never executes while the
//! cell is locked. Continuations are handed to [`delivery`], which keeps a
//! chain of settling cells off the call stack.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};

use crate::delivery::{self, Job};

/// Pairs the settled value with the subscriber's callback without running it.
type Continuation<T> = Box<dyn FnOnce(T) -> Job + Send>;

enum Listener<T> {
    Waker(Waker),
    Continuation(Continuation<T>),
}

enum State<T> {
    Pending(Option<Listener<T>>),
    /// `None` once the value has been delivered to the single consumer.
    Settled(Option<T>),
}

pub(crate) struct Cell<T> {
    state: Mutex<State<T>>,
}

pub(crate) fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Cell<T> {
    pub(crate) fn pending() -> Self {
        Self {
            state: Mutex::new(State::Pending(None)),
        }
    }

    pub(crate) fn settled(value: T) -> Self {
        Self {
            state: Mutex::new(State::Settled(Some(value))),
        }
    }

    pub(crate) fn is_settled(&self) -> bool {
        matches!(*lock(&self.state), State::Settled(_))
    }

    /// Move `Pending` to `Settled`. Returns the value back if the cell was
    /// already settled.
    pub(crate) fn settle(&self, value: T) -> Result<(), T> {
        let mut state = lock(&self.state);
        let State::Pending(listener) = &mut *state else {
            return Err(value);
        };
        match listener.take() {
            Some(Listener::Continuation(continuation)) => {
                *state = State::Settled(None);
                drop(state);
                tracing::trace!("deferred settled into continuation");
                delivery::run(continuation(value));
            }
            Some(Listener::Waker(waker)) => {
                *state = State::Settled(Some(value));
                drop(state);
                tracing::trace!("deferred settled, waking consumer");
                waker.wake();
            }
            None => {
                *state = State::Settled(Some(value));
                tracing::trace!("deferred settled with no listener");
            }
        }
        Ok(())
    }

    /// Settle for internal wiring where losing the race to settle is expected.
    pub(crate) fn settle_or_drop(&self, value: T) {
        if self.settle(value).is_err() {
            tracing::debug!("deferred already settled; dropping value");
        }
    }

    /// Register the single consumer as a continuation.
    ///
    /// Runs `callback` inline when the value is already available.
    pub(crate) fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce(T) + Send + 'static,
        T: 'static,
    {
        let continuation: Continuation<T> =
            Box::new(move |value| -> Job { Box::new(move || callback(value)) });
        let mut state = lock(&self.state);
        let value = match &mut *state {
            State::Pending(listener) => {
                *listener = Some(Listener::Continuation(continuation));
                return;
            }
            State::Settled(slot) => slot.take(),
        };
        drop(state);
        match value {
            Some(value) => {
                tracing::trace!("continuation registered on settled deferred");
                delivery::run(continuation(value));
            }
            None => tracing::warn!("continuation registered after value was consumed"),
        }
    }

    /// Poll as the single consumer. Panics if the value was already taken,
    /// matching the contract of polling a completed future.
    pub(crate) fn poll_take(&self, cx: &mut Context<'_>) -> Poll<T> {
        let mut state = lock(&self.state);
        match &mut *state {
            State::Settled(slot) => match slot.take() {
                Some(value) => Poll::Ready(value),
                None => panic!("Deferred polled after completion"),
            },
            State::Pending(listener) => {
                match listener {
                    Some(Listener::Waker(waker)) if waker.will_wake(cx.waker()) => {}
                    _ => *listener = Some(Listener::Waker(cx.waker().clone())),
                }
                Poll::Pending
            }
        }
    }
}
