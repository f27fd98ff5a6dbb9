//! Bridges between [`Deferred`] and `tokio::sync::oneshot`.
//!
//! Each bridge subscribes to the source and settles the target from inside
//! that subscription, so the target can never settle before the source has.

use rail_future::{Deferred, Outcome, Spawn, ambient};
use tokio::sync::oneshot;

use crate::outcome::{from_external_result, to_external_result};

/// Wrap a oneshot receiver, driven on the ambient tokio runtime.
///
/// A receiver whose sender is dropped without sending never settles, and
/// neither does the returned Deferred.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn from_external_future<T>(receiver: oneshot::Receiver<T>) -> Deferred<T>
where
    T: Send + 'static,
{
    from_external_future_on(&ambient(), receiver)
}

pub fn from_external_future_on<S, T>(spawner: &S, receiver: oneshot::Receiver<T>) -> Deferred<T>
where
    S: Spawn + ?Sized,
    T: Send + 'static,
{
    Deferred::make(|resolver| {
        spawner.spawn_detached(Box::pin(async move {
            match receiver.await {
                Ok(value) => {
                    let _ = resolver.resolve(value);
                }
                Err(_) => tracing::debug!("oneshot sender dropped without a value"),
            }
        }));
    })
}

/// Hand the value of `deferred` to a oneshot receiver once it settles.
pub fn to_external_future<T>(deferred: Deferred<T>) -> oneshot::Receiver<T>
where
    T: Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    deferred.on_settle(move |value| {
        if sender.send(value).is_err() {
            tracing::debug!("oneshot receiver dropped before value arrived");
        }
    });
    receiver
}

/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn from_external_future_result<T, E>(
    receiver: oneshot::Receiver<Result<T, E>>,
) -> Deferred<Outcome<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    from_external_future(receiver).map(from_external_result)
}

pub fn to_external_future_result<T, E>(
    deferred: Deferred<Outcome<T, E>>,
) -> oneshot::Receiver<Result<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    to_external_future(deferred.map(to_external_result))
}
