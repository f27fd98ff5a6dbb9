//! Combinators for the `Deferred<Outcome<T, E>>` shape.
//!
//! Each `_ok` combinator acts on the success channel only and each `_error`
//! combinator on the error channel only. The other channel's payload is moved
//! through as-is and the supplied closure is never called for it.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use rail_result::{Outcome, Panic};

use crate::Deferred;
use crate::spawn::{self, Spawn};

impl<T, E> Deferred<Outcome<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Absorb a native fallible future into the `Outcome` channel.
    ///
    /// `Ok(v)` settles to `Outcome::Ok(v)`, `Err(e)` to `Outcome::Error(e)`.
    /// The future is driven on the ambient tokio runtime. A tokio
    /// `JoinHandle` fits here too, which turns a panicking task into
    /// `Outcome::Error(JoinError)`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn from_native<F>(native: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::from_native_on(&spawn::ambient(), native)
    }

    /// [`Deferred::from_native`] on an explicit [`Spawn`] implementor.
    ///
    /// A panic inside `native` is caught and logged. It has no `E` to become,
    /// so the Deferred stays pending. Use [`Deferred::from_native_catching`]
    /// when the consumer must see it.
    pub fn from_native_on<S, F>(spawner: &S, native: F) -> Self
    where
        S: Spawn + ?Sized,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (deferred, cell) = Self::linked();
        spawner.spawn_detached(Box::pin(async move {
            match AssertUnwindSafe(native).catch_unwind().await {
                Ok(Ok(value)) => cell.settle_or_drop(Outcome::Ok(value)),
                Ok(Err(error)) => cell.settle_or_drop(Outcome::Error(error)),
                Err(payload) => {
                    let panic = Panic::from_payload(payload);
                    tracing::error!(%panic, "native future panicked before settling");
                }
            }
        }));
        deferred
    }

    /// Like [`Deferred::from_native`], but a panic inside `native` settles to
    /// `Outcome::Error(E::from(panic))`, the asynchronous counterpart of
    /// [`Outcome::from_execution`]. With `E = Panic` this absorbs panics from
    /// a future that cannot otherwise fail.
    ///
    /// ```
    /// # async fn demo() {
    /// use rail_future::{Deferred, Outcome, Panic};
    ///
    /// let out = Deferred::from_native_catching(async {
    ///     let parts: Vec<u32> = Vec::new();
    ///     Ok::<_, Panic>(parts[0])
    /// })
    /// .await;
    /// assert!(out.is_error());
    /// # }
    /// ```
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn from_native_catching<F>(native: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: From<Panic>,
    {
        Self::from_native_catching_on(&spawn::ambient(), native)
    }

    pub fn from_native_catching_on<S, F>(spawner: &S, native: F) -> Self
    where
        S: Spawn + ?Sized,
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: From<Panic>,
    {
        Self::from_native_on(spawner, async move {
            match AssertUnwindSafe(native).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => {
                    let panic = Panic::from_payload(payload);
                    tracing::warn!(%panic, "native future panicked; settling as error");
                    Err(E::from(panic))
                }
            }
        })
    }

    /// Wait for every input, then combine with [`Outcome::all`]: values in
    /// input order, or the error of the first failing input in input order.
    pub fn all_outcomes<I>(deferreds: I) -> Deferred<Outcome<Vec<T>, E>>
    where
        I: IntoIterator<Item = Self>,
    {
        Deferred::all(deferreds).map(Outcome::all)
    }

    pub fn map_ok<U, F>(self, f: F) -> Deferred<Outcome<U, E>>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.map(move |outcome| outcome.map(f))
    }

    pub fn map_error<G, F>(self, f: F) -> Deferred<Outcome<T, G>>
    where
        G: Send + 'static,
        F: FnOnce(E) -> G + Send + 'static,
    {
        self.map(move |outcome| outcome.map_error(f))
    }

    /// Chain another asynchronous fallible step on success.
    pub fn flat_map_ok<U, F>(self, f: F) -> Deferred<Outcome<U, E>>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Deferred<Outcome<U, E>> + Send + 'static,
    {
        self.flat_map(move |outcome| match outcome {
            Outcome::Ok(value) => f(value),
            Outcome::Error(error) => Deferred::value(Outcome::Error(error)),
        })
    }

    /// Recover from an error with another asynchronous step.
    pub fn flat_map_error<G, F>(self, f: F) -> Deferred<Outcome<T, G>>
    where
        G: Send + 'static,
        F: FnOnce(E) -> Deferred<Outcome<T, G>> + Send + 'static,
    {
        self.flat_map(move |outcome| match outcome {
            Outcome::Ok(value) => Deferred::value(Outcome::Ok(value)),
            Outcome::Error(error) => f(error),
        })
    }

    pub fn tap_ok<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.map(move |outcome| outcome.tap_ok(f))
    }

    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        self.map(move |outcome| outcome.tap_error(f))
    }

    /// Rewrite the whole `Outcome` at once.
    pub fn map_result<U, G, F>(self, f: F) -> Deferred<Outcome<U, G>>
    where
        U: Send + 'static,
        G: Send + 'static,
        F: FnOnce(Outcome<T, E>) -> Outcome<U, G> + Send + 'static,
    {
        self.map(f)
    }

    /// Synchronous fallible step on success.
    pub fn map_ok_to_result<U, F>(self, f: F) -> Deferred<Outcome<U, E>>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Outcome<U, E> + Send + 'static,
    {
        self.map(move |outcome| outcome.flat_map(f))
    }

    pub fn map_error_to_result<G, F>(self, f: F) -> Deferred<Outcome<T, G>>
    where
        G: Send + 'static,
        F: FnOnce(E) -> Outcome<T, G> + Send + 'static,
    {
        self.map(move |outcome| outcome.flat_map_error(f))
    }
}
