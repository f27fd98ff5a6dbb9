//! Single-resolution asynchronous values for railway-oriented composition.
//!
//! [`Deferred<T>`] is a value that settles exactly once. It is consumed by
//! `.await` (it implements [`std::future::Future`]) or by combinators. The
//! `Deferred<Outcome<T, E>>` shape gets a second combinator family
//! (`map_ok`, `flat_map_ok`, `map_error`, `tap_ok`, `tap_error`, ...) that acts
//! on one channel and moves the other through untouched.
//!
//! - **`cell`**: the single-assignment state machine behind every Deferred
//! - **`delivery`**: the per-thread queue that runs settled continuations
//! - **`deferred`**: construction, generic combinators, `all` and `race`
//! - **`railway`**: `Outcome`-aware combinators and native absorption
//! - **`config`**: how a second `resolve` is treated
//! - **`spawn`**: the hook through which native futures reach the runtime
//!
//! There is no cancellation: bound an operation by racing it against
//! [`Deferred::after`].

mod cell;
mod config;
mod deferred;
mod delivery;
mod error;
mod railway;
mod spawn;

pub use config::{ConfigError, DeferredConfig, ResolvePolicy};
pub use deferred::{Deferred, Resolver};
pub use error::AlreadySettled;
pub use rail_result::{Outcome, Panic};
pub use spawn::{Spawn, ambient};
