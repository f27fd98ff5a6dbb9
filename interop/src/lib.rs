//! Adapters between rail types and their ecosystem counterparts.
//!
//! | rail | counterpart |
//! |------|-------------|
//! | [`Outcome<T, E>`] | [`Result<T, E>`] |
//! | [`Deferred<T>`] | [`tokio::sync::oneshot::Receiver<T>`] |
//!
//! These functions are the only place the two families meet. Payloads are
//! moved across, never cloned or transformed, and a converted value behaves
//! exactly like one built natively on the other side.
//!
//! [`Outcome<T, E>`]: rail_result::Outcome
//! [`Deferred<T>`]: rail_future::Deferred

mod deferred;
mod outcome;

pub use deferred::{
    from_external_future, from_external_future_on, from_external_future_result,
    to_external_future, to_external_future_result,
};
pub use outcome::{from_external_result, to_external_result};
