//! Panic payload captured where a computation is absorbed into an `Outcome`.

use std::any::Any;

use thiserror::Error;

/// A panic caught by [`Outcome::from_execution`](crate::Outcome::from_execution)
/// or by `Deferred::from_native_catching` in `rail-future`.
///
/// The payload of a panic is an opaque `Box<dyn Any + Send>`. Almost every
/// panic carries either a `&'static str` or a `String` (that is what `panic!`
/// produces), so the message is extracted eagerly and the box is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panicked: {message}")]
pub struct Panic {
    message: String,
}

impl Panic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extract a message from a payload returned by `catch_unwind`.
    #[must_use]
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        Self { message }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
