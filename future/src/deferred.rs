//! [`Deferred`], its producer handle [`Resolver`], and the generic combinators.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::time;

use crate::cell::{self, Cell};
use crate::config::{DeferredConfig, ResolvePolicy};
use crate::error::AlreadySettled;
use crate::spawn::{self, Spawn};

/// A value that becomes available after at most one resolution step.
///
/// A `Deferred` is eager: whatever produces its value is already running (or
/// already done) by the time you hold it. Consuming it is done exactly once,
/// either by `.await`ing it (it implements [`Future`]) or by chaining a
/// combinator, which takes `self`.
///
/// Combinator closures run inline on the thread that settles the source.
///
/// ```
/// # async fn demo() {
/// use rail_future::Deferred;
///
/// let doubled = Deferred::value(21).map(|x| x * 2);
/// assert_eq!(doubled.await, 42);
/// # }
/// ```
#[must_use = "a Deferred only delivers its value when awaited or chained"]
pub struct Deferred<T> {
    cell: Arc<Cell<T>>,
}

/// Producer side of a [`Deferred`] built with [`Deferred::make`].
///
/// Cloneable so an executor can hand it to several racing producers. The
/// first `resolve` across all clones settles the Deferred.
pub struct Resolver<T> {
    producer: Arc<Producer<T>>,
    policy: ResolvePolicy,
}

struct Producer<T> {
    cell: Arc<Cell<T>>,
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        if !self.cell.is_settled() {
            tracing::warn!("every Resolver dropped before settling; Deferred will never settle");
        }
    }
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
            policy: self.policy,
        }
    }
}

impl<T> Resolver<T> {
    /// Settle the Deferred with `value`.
    ///
    /// Only the first call across all clones has effect. What a later call
    /// returns depends on the [`ResolvePolicy`] the Deferred was made with:
    /// `Ignore` reports `Ok(())` and drops the value, `Reject` hands it back.
    pub fn resolve(&self, value: T) -> Result<(), AlreadySettled<T>> {
        match self.producer.cell.settle(value) {
            Ok(()) => Ok(()),
            Err(value) => match self.policy {
                ResolvePolicy::Ignore => {
                    tracing::debug!("ignoring resolve on already-settled Deferred");
                    Ok(())
                }
                ResolvePolicy::Reject => Err(AlreadySettled(value)),
            },
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.producer.cell.is_settled()
    }
}

impl<T> Deferred<T> {
    /// A pending Deferred plus the cell that settles it, for internal wiring.
    pub(crate) fn linked() -> (Self, Arc<Cell<T>>) {
        let cell = Arc::new(Cell::pending());
        (
            Self {
                cell: Arc::clone(&cell),
            },
            cell,
        )
    }

    /// A Deferred that is already settled to `value`.
    pub fn value(value: T) -> Self {
        Self {
            cell: Arc::new(Cell::settled(value)),
        }
    }

    /// Build a Deferred from an executor that receives its [`Resolver`].
    ///
    /// The executor runs immediately, before `make` returns. It can resolve
    /// synchronously or move the resolver into a task that resolves later.
    ///
    /// ```
    /// # async fn demo() {
    /// use rail_future::Deferred;
    ///
    /// let answer = Deferred::make(|resolver| {
    ///     tokio::spawn(async move {
    ///         let _ = resolver.resolve(42);
    ///     });
    /// });
    /// assert_eq!(answer.await, 42);
    /// # }
    /// ```
    pub fn make<F>(executor: F) -> Self
    where
        F: FnOnce(Resolver<T>),
    {
        Self::make_with(&DeferredConfig::default(), executor)
    }

    /// [`Deferred::make`] with an explicit [`DeferredConfig`].
    pub fn make_with<F>(config: &DeferredConfig, executor: F) -> Self
    where
        F: FnOnce(Resolver<T>),
    {
        let (deferred, cell) = Self::linked();
        executor(Resolver {
            producer: Arc::new(Producer { cell }),
            policy: config.resolve_policy,
        });
        deferred
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cell.is_settled()
    }
}

impl<T: Send + 'static> Deferred<T> {
    /// A Deferred that settles to `value` once `delay` has elapsed on the
    /// ambient tokio runtime. Race it against another Deferred to bound how
    /// long you wait for that one.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn after(delay: Duration, value: T) -> Self {
        Self::after_on(&spawn::ambient(), delay, value)
    }

    pub fn after_on<S>(spawner: &S, delay: Duration, value: T) -> Self
    where
        S: Spawn + ?Sized,
    {
        Self::make(|resolver| {
            spawner.spawn_detached(Box::pin(async move {
                time::sleep(delay).await;
                let _ = resolver.resolve(value);
            }));
        })
    }

    /// Consume the Deferred by registering `callback` for its value.
    ///
    /// Every combinator is built on this. The callback runs on the thread that
    /// settles the source, or right away when the value is already there. A
    /// callback that settles further Deferreds finishes before their own
    /// callbacks start, so chains of any length settle in constant stack.
    pub fn on_settle<F>(self, callback: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.cell.subscribe(callback);
    }

    pub fn map<U, F>(self, f: F) -> Deferred<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let (target, cell) = Deferred::linked();
        self.on_settle(move |value| cell.settle_or_drop(f(value)));
        target
    }

    pub fn flat_map<U, F>(self, f: F) -> Deferred<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Deferred<U> + Send + 'static,
    {
        let (target, cell) = Deferred::linked();
        self.on_settle(move |value| {
            f(value).on_settle(move |inner| cell.settle_or_drop(inner));
        });
        target
    }

    /// Observe the value without changing it.
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.map(move |value| {
            f(&value);
            value
        })
    }

    /// Explicit conversion to a boxed native future.
    ///
    /// `Deferred` already implements [`Future`]; this is for call sites that
    /// need a nameable, type-erased future.
    pub fn into_native(self) -> BoxFuture<'static, T> {
        Box::pin(self)
    }

    /// Wait for every input and collect the values in input order.
    ///
    /// Inputs are already running; completion order does not matter. An empty
    /// input settles immediately to an empty vector.
    pub fn all<I>(deferreds: I) -> Deferred<Vec<T>>
    where
        I: IntoIterator<Item = Self>,
    {
        let deferreds: Vec<Self> = deferreds.into_iter().collect();
        if deferreds.is_empty() {
            return Deferred::value(Vec::new());
        }

        let (target, cell) = Deferred::linked();
        let join = Arc::new(Join {
            slots: Mutex::new(JoinSlots {
                values: deferreds.iter().map(|_| None).collect(),
                remaining: deferreds.len(),
            }),
            target: cell,
        });
        for (index, deferred) in deferreds.into_iter().enumerate() {
            let join = Arc::clone(&join);
            deferred.on_settle(move |value| join.fill(index, value));
        }
        target
    }

    /// Settle with whichever input settles first.
    ///
    /// Losers are not cancelled: they keep running and whatever they produce
    /// later is dropped. With no inputs the result never settles.
    pub fn race<I>(deferreds: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let (target, cell) = Self::linked();
        let mut entrants = 0_usize;
        for (index, deferred) in deferreds.into_iter().enumerate() {
            let cell = Arc::clone(&cell);
            deferred.on_settle(move |value| {
                if cell.settle(value).is_err() {
                    tracing::debug!(entrant = index, "race already decided; dropping late value");
                }
            });
            entrants += 1;
        }
        if entrants == 0 {
            tracing::debug!("race started with no entrants; it will never settle");
        }
        target
    }
}

impl<T, E> Deferred<Result<T, E>> {
    /// A Deferred that, consumed natively, yields `Err(error)`: the value
    /// Rust async code propagates with `?`.
    pub fn reject(error: E) -> Self {
        Self::value(Err(error))
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T> Future for Deferred<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        self.cell.poll_take(cx)
    }
}

struct Join<T> {
    slots: Mutex<JoinSlots<T>>,
    target: Arc<Cell<Vec<T>>>,
}

struct JoinSlots<T> {
    values: Vec<Option<T>>,
    remaining: usize,
}

impl<T> Join<T> {
    fn fill(&self, index: usize, value: T) {
        let mut slots = cell::lock(&self.slots);
        slots.values[index] = Some(value);
        slots.remaining -= 1;
        if slots.remaining > 0 {
            return;
        }
        let values: Vec<T> = slots.values.drain(..).flatten().collect();
        drop(slots);
        self.target.settle_or_drop(values);
    }
}
