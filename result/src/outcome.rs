//! The [`Outcome`] sum type and its combinators.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::Panic;

/// The result of a fallible computation: exactly one of a success value or a
/// domain error.
///
/// Every combinator consumes `self` and returns a new `Outcome`. The channel a
/// combinator does not act on is moved through untouched, so an `Error`
/// flowing through a chain of `map`/`flat_map` calls arrives at the end as the
/// very same value that entered it.
///
/// ```
/// use rail_result::Outcome;
///
/// let parsed: Outcome<u16, String> = Outcome::Ok("8080")
///     .flat_map(|raw: &str| match raw.parse::<u16>() {
///         Ok(port) => Outcome::Ok(port),
///         Err(err) => Outcome::Error(err.to_string()),
///     })
///     .map(|port| port + 1);
///
/// assert_eq!(parsed, Outcome::Ok(8081));
/// ```
#[must_use = "this `Outcome` may be an `Error` variant, which should be handled"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome<T, E> {
    Ok(T),
    Error(E),
}

impl<T, E> Outcome<T, E> {
    /// Wrap an `Option`, using `error` when it is `None`.
    pub fn from_option(option: Option<T>, error: E) -> Self {
        match option {
            Some(value) => Self::Ok(value),
            None => Self::Error(error),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(error) => Outcome::Error(error),
        }
    }

    /// Transform the success value. `f` is never called on `Error`.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Error(error) => Outcome::Error(error),
        }
    }

    /// Chain another fallible step. `Error` short-circuits.
    pub fn flat_map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Self::Ok(value) => f(value),
            Self::Error(error) => Outcome::Error(error),
        }
    }

    pub fn map_error<G, F>(self, f: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(error) => Outcome::Error(f(error)),
        }
    }

    /// Recover from (or replace) an error with another fallible step.
    pub fn flat_map_error<G, F>(self, f: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> Outcome<T, G>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(error) => f(error),
        }
    }

    /// Fold both channels into one value. Exactly one of the closures runs.
    pub fn match_with<R, OnOk, OnError>(self, on_ok: OnOk, on_error: OnError) -> R
    where
        OnOk: FnOnce(T) -> R,
        OnError: FnOnce(E) -> R,
    {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Error(error) => on_error(error),
        }
    }

    #[must_use]
    pub fn get_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Error(_) => default,
        }
    }

    /// Same as [`Outcome::get_or`]. Both names exist so code written against
    /// either spelling keeps compiling.
    #[must_use]
    pub fn get_with_default(self, default: T) -> T {
        self.get_or(default)
    }

    #[must_use]
    pub fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => f(value),
            Self::Error(_) => default,
        }
    }

    #[must_use]
    pub fn to_option(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    pub fn tap_ok<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Ok(value) = &self {
            f(value);
        }
        self
    }

    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Self::Error(error) = &self {
            f(error);
        }
        self
    }

    /// Combine an ordered sequence into one `Outcome`.
    ///
    /// Success values keep their input order. The first `Error` wins and the
    /// remaining elements are not pulled from the iterator.
    pub fn all<I>(outcomes: I) -> Outcome<Vec<T>, E>
    where
        I: IntoIterator<Item = Self>,
    {
        outcomes.into_iter().collect()
    }

    /// Keyed counterpart of [`Outcome::all`]; the first error in key order wins.
    pub fn all_from_map<K: Ord>(outcomes: BTreeMap<K, Self>) -> Outcome<BTreeMap<K, T>, E> {
        outcomes
            .into_iter()
            .map(|(key, outcome)| outcome.map(|value| (key, value)))
            .collect()
    }
}

impl<T> Outcome<T, Panic> {
    /// Run `thunk`, turning a panic into `Outcome::Error`.
    ///
    /// This is the one place where an unwinding call is absorbed into the
    /// error channel. Note that the process panic hook still runs, so the
    /// panic message is printed to stderr as usual.
    pub fn from_execution<F>(thunk: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match panic::catch_unwind(AssertUnwindSafe(thunk)) {
            Ok(value) => Self::Ok(value),
            Err(payload) => Self::Error(Panic::from_payload(payload)),
        }
    }
}

impl<T, E, C> FromIterator<Outcome<T, E>> for Outcome<C, E>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        let mut first_error = None;
        let collected: C = iter
            .into_iter()
            .map_while(|outcome| match outcome {
                Outcome::Ok(value) => Some(value),
                Outcome::Error(error) => {
                    first_error = Some(error);
                    None
                }
            })
            .collect();
        match first_error {
            Some(error) => Self::Error(error),
            None => Self::Ok(collected),
        }
    }
}
