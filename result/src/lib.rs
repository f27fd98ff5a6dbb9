//! Outcome sum type for railway-oriented composition.
//!
//! This crate contains the synchronous half of the primitives: a closed
//! two-variant [`Outcome`] with combinators that short-circuit on `Error`,
//! and [`Panic`], the error captured when a panicking call is absorbed by
//! [`Outcome::from_execution`]. No IO, no async.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Outcome-returning functions are self-explanatory

mod outcome;
mod panic;

pub use outcome::Outcome;
pub use panic::Panic;

/// Free-function form of [`Outcome::is_ok`], usable as a predicate in
/// iterator adaptors (`outcomes.into_iter().filter(rail_result::is_ok)`).
#[must_use]
pub fn is_ok<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_ok()
}

/// Free-function form of [`Outcome::is_error`].
#[must_use]
pub fn is_error<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_error()
}
